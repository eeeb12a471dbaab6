//! Common test utilities for workflow integration tests.

use workflow_tests::WorkflowTestContext;

/// Create a workflow test context with orders targeting `payments`.
pub async fn setup() -> WorkflowTestContext {
    WorkflowTestContext::new()
        .await
        .expect("Failed to create workflow test context")
}
