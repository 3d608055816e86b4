use crate::error::ConfigurationError;

use super::{Persona, Role, SessionLength};

/// Builds a debater persona.
///
/// `exchange_budget` is a session-length label (`Short` or `Long`); the
/// first speaker is told to open, the other to wait for the opening.
pub fn compile(
    role: &Role,
    scenario: &str,
    opposing_role: &Role,
    exchange_budget: &str,
    is_first_speaker: bool,
) -> Result<Persona, ConfigurationError> {
    let exchanges = exchange_budget.parse::<SessionLength>()?.exchange_count();

    let mut text = format!(
        "You are an AI debater taking part in a debate about: {scenario}\n\
         Role: {}\n",
        role.name
    );
    if let Some(stance) = &role.stance {
        text.push_str(&format!("Position: {stance}\n"));
    }
    text.push_str(&format!(
        "- Present clear arguments backed by evidence\n\
         - Respond directly to your opponent's points\n\
         - Stay logically consistent\n\
         - Keep an academic yet accessible tone\n\
         - Limit each response to 3-5 concise paragraphs\n\
         - You will exchange arguments {exchanges} times\n"
    ));
    if is_first_speaker {
        text.push_str("You will initiate the debate.");
    } else {
        text.push_str(&format!(
            "Wait for {}'s opening statement.",
            opposing_role.name
        ));
    }

    Ok(Persona::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> (Role, Role) {
        (
            Role::new("Proponent").with_stance("for"),
            Role::new("Opponent").with_stance("against"),
        )
    }

    #[test]
    fn first_speaker_initiates() {
        let (pro, con) = roles();
        let persona = compile(&pro, "Nuclear power", &con, "Short", true).expect("persona");
        assert!(persona.text.contains("debate about: Nuclear power"));
        assert!(persona.text.contains("Role: Proponent"));
        assert!(persona.text.contains("Position: for"));
        assert!(persona.text.contains("exchange arguments 4 times"));
        assert!(persona.text.ends_with("You will initiate the debate."));
        assert_eq!(persona.temperature, None);
    }

    #[test]
    fn second_speaker_waits_for_the_opponent() {
        let (pro, con) = roles();
        let persona = compile(&con, "Nuclear power", &pro, "Long", false).expect("persona");
        assert!(persona.text.contains("exchange arguments 8 times"));
        assert!(persona.text.ends_with("Wait for Proponent's opening statement."));
    }

    #[test]
    fn compilation_is_deterministic() {
        let (pro, con) = roles();
        let a = compile(&pro, "X", &con, "Short", true).expect("persona");
        let b = compile(&pro, "X", &con, "Short", true).expect("persona");
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_budget_is_a_configuration_error() {
        let (pro, con) = roles();
        assert_eq!(
            compile(&pro, "X", &con, "Medium", true),
            Err(ConfigurationError::UnknownSessionLength("Medium".into()))
        );
    }
}
