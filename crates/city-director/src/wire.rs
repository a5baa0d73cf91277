//! Raw response shapes, exactly as loose as planners produce them.
//!
//! Every field is optional and `#[serde(default)]`, so a response that omits
//! `instructions`, `assetOps`, or `shake` still deserializes.  Items are kept
//! as `serde_json::Value` until [`crate::parse`] validates them one by one,
//! so a single bad entry cannot sink the whole response.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawResponse {
    pub instructions:    Option<Vec<Value>>,
    #[serde(alias = "assetsOps")]
    pub asset_ops:       Option<Vec<Value>>,
    #[serde(alias = "worldShake")]
    pub shake:           Option<Value>,
    #[serde(alias = "strategy")]
    pub global_strategy: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawInstruction {
    pub agent_id:  Option<String>,
    pub action:    Option<String>,
    pub target:    Option<RawPoint>,
    pub priority:  Option<String>,
    pub reasoning: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAssetOp {
    #[serde(alias = "action", alias = "type")]
    pub op:       Option<String>,
    pub kind:     Option<String>,
    #[serde(alias = "target")]
    pub position: Option<RawPoint>,
    pub ttl:      Option<f64>,
    pub radius:   Option<f64>,
}
