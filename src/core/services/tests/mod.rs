
use crate::horizon::PlanningHorizon;

fn horizon() -> PlanningHorizon {
    PlanningHorizon::new(vec!["Aug".into(), "Sep".into(), "Oct".into()]).expect("horizon")
}
