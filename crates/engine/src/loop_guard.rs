//! Repeated-invocation detection.
//!
//! A round is loop-detected when any invocation it requests repeats any
//! invocation already executed in a prior round: same tool name and
//! structurally equal JSON input. Correlation ids differ every round and
//! are never compared. Input equality goes through `serde_json::Value`,
//! so object key order is irrelevant.

use lectern_core::ToolInvocation;

/// Whether any invocation in `current` repeats one in `used`.
pub fn is_repeat(current: &[ToolInvocation], used: &[ToolInvocation]) -> bool {
    current.iter().any(|c| used.iter().any(|u| c.repeats(u)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(id: &str, name: &str, input: serde_json::Value) -> ToolInvocation {
        ToolInvocation {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    #[test]
    fn identical_call_is_a_repeat() {
        let previous = vec![invocation(
            "toolu_1",
            "search_course_content",
            serde_json::json!({"query": "test"}),
        )];
        let current = vec![invocation(
            "toolu_2",
            "search_course_content",
            serde_json::json!({"query": "test"}),
        )];
        assert!(is_repeat(&current, &previous));
    }

    #[test]
    fn different_input_is_not_a_repeat() {
        let previous = vec![invocation(
            "toolu_1",
            "search_course_content",
            serde_json::json!({"query": "test"}),
        )];
        let current = vec![invocation(
            "toolu_2",
            "search_course_content",
            serde_json::json!({"query": "test2"}),
        )];
        assert!(!is_repeat(&current, &previous));
    }

    #[test]
    fn different_tool_is_not_a_repeat() {
        let previous = vec![invocation(
            "toolu_1",
            "search_course_content",
            serde_json::json!({"query": "test"}),
        )];
        let current = vec![invocation(
            "toolu_2",
            "get_course_outline",
            serde_json::json!({"query": "test"}),
        )];
        assert!(!is_repeat(&current, &previous));
    }

    #[test]
    fn key_order_does_not_matter() {
        let previous = vec![invocation(
            "toolu_1",
            "search_course_content",
            serde_json::json!({"query": "test", "course_title": "MCP"}),
        )];
        let current = vec![invocation(
            "toolu_2",
            "search_course_content",
            serde_json::json!({"course_title": "MCP", "query": "test"}),
        )];
        assert!(is_repeat(&current, &previous));
    }

    #[test]
    fn any_overlap_counts() {
        let previous = vec![
            invocation("toolu_1", "get_course_outline", serde_json::json!({"course_title": "A"})),
            invocation("toolu_2", "search_course_content", serde_json::json!({"query": "x"})),
        ];
        let current = vec![
            invocation("toolu_3", "search_course_content", serde_json::json!({"query": "y"})),
            invocation("toolu_4", "search_course_content", serde_json::json!({"query": "x"})),
        ];
        assert!(is_repeat(&current, &previous));
    }

    #[test]
    fn empty_previous_round_never_repeats() {
        let current = vec![invocation(
            "toolu_1",
            "search_course_content",
            serde_json::json!({"query": "test"}),
        )];
        assert!(!is_repeat(&current, &[]));
    }
}
