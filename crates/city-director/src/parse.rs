//! Planner response → validated [`DirectorPlan`].
//!
//! # Pipeline
//!
//! 1. Strip Markdown code fences (```` ```json ```` and bare ```` ``` ````).
//! 2. Cut the outermost `{ … }` out of any surrounding chatter.
//! 3. Deserialize into the loose [`RawResponse`].
//! 4. Validate each instruction and asset op independently; drop the bad
//!    ones with a `warn!`.

use serde_json::Value;
use tracing::warn;

use city_agent::{Directive, DirectiveAction, Priority};
use city_core::{AgentId, Position};
use city_world::{AssetFilter, AssetKind, AssetOp, DirectorPlan};

use crate::wire::{RawAssetOp, RawInstruction, RawPoint, RawResponse};
use crate::{DirectorError, DirectorResult};

/// Parse a raw planner reply.
///
/// Fails only when no JSON object can be recovered at all.  Absent arrays
/// become empty; invalid items are skipped.
pub fn parse_response(text: &str) -> DirectorResult<DirectorPlan> {
    let cleaned = strip_code_fences(text);
    let json = extract_json(&cleaned)?;
    let raw: RawResponse = serde_json::from_str(json)?;

    let directives: Vec<Directive> = raw
        .instructions
        .unwrap_or_default()
        .into_iter()
        .filter_map(directive_from_value)
        .collect();

    let asset_ops: Vec<AssetOp> = raw
        .asset_ops
        .unwrap_or_default()
        .into_iter()
        .filter_map(asset_op_from_value)
        .collect();

    Ok(DirectorPlan {
        directives,
        asset_ops,
        shake: raw.shake.as_ref().is_some_and(truthy),
        strategy: raw.global_strategy.filter(|s| !s.trim().is_empty()),
    })
}

/// Remove Markdown code-fence markers, keeping their contents.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_owned()
}

/// The span from the first `{` to the last `}` inclusive.
pub fn extract_json(text: &str) -> DirectorResult<&str> {
    let start = text.find('{').ok_or(DirectorError::NoJson)?;
    let end = text.rfind('}').ok_or(DirectorError::NoJson)?;
    if end < start {
        return Err(DirectorError::NoJson);
    }
    Ok(&text[start..=end])
}

// ── Item validation ───────────────────────────────────────────────────────────

fn directive_from_value(value: Value) -> Option<Directive> {
    let raw: RawInstruction = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "dropping malformed instruction");
            return None;
        }
    };

    let Some(agent_id) = raw.agent_id.as_deref().and_then(|s| s.parse::<AgentId>().ok()) else {
        warn!(agent_id = ?raw.agent_id, "dropping instruction with invalid agent id");
        return None;
    };
    let Some(action) = raw.action.as_deref().and_then(DirectiveAction::from_name) else {
        warn!(%agent_id, action = ?raw.action, "dropping instruction with unknown action");
        return None;
    };

    let target = match raw.target.as_ref().map(point) {
        Some(None) => {
            warn!(%agent_id, "dropping instruction with non-finite target");
            return None;
        }
        Some(Some(p)) => Some(p),
        None => None,
    };

    // An unknown priority is advisory metadata only; keep the instruction.
    let priority = raw.priority.as_deref().and_then(|p| {
        let parsed = Priority::from_name(p);
        if parsed.is_none() {
            warn!(%agent_id, priority = p, "ignoring unknown priority");
        }
        parsed
    });

    Some(Directive {
        agent_id,
        action,
        target,
        priority,
        reasoning: raw.reasoning,
    })
}

fn asset_op_from_value(value: Value) -> Option<AssetOp> {
    let raw: RawAssetOp = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "dropping malformed asset op");
            return None;
        }
    };

    let kind = match raw.kind.as_deref() {
        None => None,
        Some(name) => match AssetKind::from_name(name) {
            Some(k) => Some(k),
            None => {
                warn!(kind = name, "dropping asset op with unknown kind");
                return None;
            }
        },
    };
    let position = match raw.position.as_ref().map(point) {
        Some(None) => {
            warn!("dropping asset op with non-finite position");
            return None;
        }
        Some(Some(p)) => Some(p),
        None => None,
    };

    match raw.op.as_deref() {
        Some("add" | "spawn") => {
            let (Some(kind), Some(position)) = (kind, position) else {
                warn!("dropping asset add without kind and position");
                return None;
            };
            let ttl = raw
                .ttl
                .filter(|t| t.is_finite() && *t >= 0.0)
                .map(|t| t.round().min(u32::MAX as f64) as u32);
            Some(AssetOp::Add { kind, position, ttl })
        }
        Some("remove" | "despawn") => {
            let radius = raw.radius.filter(|r| r.is_finite() && *r >= 0.0).map(|r| r as f32);
            Some(AssetOp::Remove(AssetFilter { kind, near: position, radius }))
        }
        other => {
            warn!(op = ?other, "dropping asset op with unknown operation");
            None
        }
    }
}

fn point(p: &RawPoint) -> Option<Position> {
    let pos = Position::new(p.x as f32, p.y as f32);
    pos.is_finite().then_some(pos)
}

/// Accept `true`, non-zero numbers, and `"true"`/`"yes"` as a shake request.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b)   => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _                => false,
    }
}
