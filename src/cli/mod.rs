pub mod orchestration;

pub use orchestration::{
    plan_bump, resolve_current_version, run_bump_workflow, BumpPlan, BumpWorkflowArgs,
    WorkflowResult,
};
