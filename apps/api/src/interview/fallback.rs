//! Fallback questions, used when nothing usable comes back from the model.

use crate::interview::extractor::QuestionCount;

/// Deterministic, role-aware default questions. Never empty.
pub fn fallback_questions(role: &str, tech_stack: &str, count: QuestionCount) -> Vec<String> {
    let role = match role.trim() {
        "" => "this role",
        r => r,
    };
    let stack = match tech_stack.trim() {
        "" => "your tech stack",
        s => s,
    };

    [
        format!("Can you walk me through your experience working as a {role}?"),
        "How do you approach solving a difficult problem when you are stuck?".to_string(),
        format!("What would you say are your strongest skills when working with {stack}?"),
        "Can you describe a challenging project you worked on and how you handled it?"
            .to_string(),
        format!("How do you stay current with new trends and tools around {stack}?"),
    ]
    .into_iter()
    .take(count.get().max(1))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::denylist::Denylist;

    #[test]
    fn test_fallback_truncates_and_mentions_inputs() {
        let questions = fallback_questions("Backend Engineer", "Go, Postgres", QuestionCount::new(3));
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| !q.trim().is_empty()));
        assert!(questions[0].contains("Backend Engineer"));
        assert!(questions[2].contains("Go, Postgres"));
    }

    #[test]
    fn test_fallback_caps_at_template_size() {
        let questions = fallback_questions("SRE", "Kubernetes", QuestionCount::new(12));
        assert_eq!(questions.len(), 5);
    }

    #[test]
    fn test_fallback_default_count() {
        let questions = fallback_questions("SRE", "Kubernetes", QuestionCount::new(0));
        assert_eq!(questions.len(), 5);
    }

    #[test]
    fn test_fallback_empty_stack() {
        let questions = fallback_questions("Data Engineer", "  ", QuestionCount::new(5));
        assert!(questions[2].contains("your tech stack"));
    }

    #[test]
    fn test_fallback_is_deterministic_and_passes_default_denylist() {
        let a = fallback_questions("Backend Engineer", "Go", QuestionCount::new(5));
        let b = fallback_questions("Backend Engineer", "Go", QuestionCount::new(5));
        assert_eq!(a, b);

        let denylist = Denylist::default();
        assert!(a.iter().all(|q| denylist.accepts(q)));
    }
}
