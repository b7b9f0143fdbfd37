use dnslookup_domain::{DomainError, ResolvedAnswers};

/// One `name -> address` line per resolved name, unresolved aliases shown
/// as `(unresolved)`.
pub fn render_answers(answers: &ResolvedAnswers) -> String {
    if answers.is_empty() {
        return "no answers".to_string();
    }

    answers
        .iter()
        .map(|(name, address)| match address {
            Some(address) => format!("{} -> {}", name, address),
            None => format!("{} -> (unresolved)", name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_error(error: &DomainError) -> String {
    format!("{} ({})", error.code().describe(), error)
}
