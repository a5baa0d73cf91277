//! A validated Director response, ready to apply.

use city_agent::Directive;

use crate::AssetOp;

/// Everything one planner round asks of the world.  Every part may be empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectorPlan {
    pub directives: Vec<Directive>,
    pub asset_ops:  Vec<AssetOp>,
    pub shake:      bool,
    pub strategy:   Option<String>,
}

impl DirectorPlan {
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty() && self.asset_ops.is_empty() && !self.shake
    }
}
