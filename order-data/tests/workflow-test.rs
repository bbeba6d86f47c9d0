use order_data::models::order::Tone;
use order_data::models::workflow::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_parse() {
        let body = r#"{
            "execution_arn": "arn:aws:states:us-east-1:123456789012:execution:order-workflow:order-a3a5a7cb",
            "status": "RUNNING",
            "start_date": "2026-08-01T09:12:46+00:00",
            "stop_date": null
        }"#;

        let execution: WorkflowExecution = serde_json::from_str(body).expect("should parse");
        assert_eq!(execution.status, ExecutionState::Running);
        assert!(execution.stop_date.is_none());
        assert!(execution.input.is_none());
        assert!(!execution.status.is_terminal());
    }

    #[test]
    fn test_execution_with_payloads() {
        let body = r#"{
            "execution_arn": "arn:aws:states:us-east-1:123456789012:execution:order-workflow:order-e2f0c7f2",
            "execution_name": "order-e2f0c7f2",
            "status": "SUCCEEDED",
            "start_date": "2026-08-01T09:12:46+00:00",
            "stop_date": "2026-08-01T09:13:02+00:00",
            "input": { "order_id": "e2f0c7f2", "total_amount": 89.99 },
            "output": { "payment": "captured" }
        }"#;

        let execution: WorkflowExecution = serde_json::from_str(body).expect("should parse");
        assert_eq!(execution.status, ExecutionState::Succeeded);
        assert!(execution.status.is_terminal());
        assert_eq!(execution.input.unwrap()["total_amount"], 89.99);
        assert_eq!(execution.output.unwrap()["payment"], "captured");
    }

    #[test]
    fn test_state_classification() {
        assert_eq!(ExecutionState::Running.tone(), Tone::Info);
        assert_eq!(ExecutionState::Succeeded.tone(), Tone::Success);
        assert_eq!(ExecutionState::Failed.tone(), Tone::Danger);
        assert_eq!(ExecutionState::TimedOut.tone(), Tone::Warning);
        assert_eq!(ExecutionState::Aborted.tone(), Tone::Dark);
        assert_eq!(ExecutionState::Unknown.tone(), Tone::Secondary);
    }

    #[test]
    fn test_unknown_state_falls_back() {
        let execution: WorkflowExecution =
            serde_json::from_str(r#"{ "status": "PENDING_REDRIVE" }"#)
                .expect("unknown states must not fail the lookup");
        assert_eq!(execution.status, ExecutionState::Unknown);
        assert_eq!(execution.status.as_str(), "UNKNOWN");
    }

    #[test]
    fn test_state_wire_names() {
        let state: ExecutionState = serde_json::from_str(r#""TIMED_OUT""#).unwrap();
        assert_eq!(state, ExecutionState::TimedOut);
        assert_eq!(serde_json::to_string(&state).unwrap(), r#""TIMED_OUT""#);
    }
}
