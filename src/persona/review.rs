use super::Persona;

/// Upper bound of the rigor scale; larger values are clamped to it.
pub const MAX_RIGOR: u32 = 100;

const MAX_TEMPERATURE: f32 = 0.9;
const MIN_TEMPERATURE: f32 = 0.1;

/// Maps reviewer rigor (0..=100) to sampling temperature: 0 -> 0.9, 100 -> 0.1.
pub fn rigor_to_temperature(rigor: u32) -> f32 {
    let rigor = rigor.min(MAX_RIGOR) as f32;
    let temperature =
        MAX_TEMPERATURE - (rigor / MAX_RIGOR as f32) * (MAX_TEMPERATURE - MIN_TEMPERATURE);
    temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

/// Persona for the peer reviewer; its temperature is derived from `rigor`.
pub fn reviewer(title: &str, abstract_text: &str, focus_areas: &[String], rigor: u32) -> Persona {
    let rigor = rigor.min(MAX_RIGOR);
    let text = format!(
        "As peer reviewer of \"{title}\":\n\
         - Focus: {}\n\
         - Rigor: {rigor}/{MAX_RIGOR}\n\
         - Ask probing questions\n\
         - Identify methodological flaws\n\
         - Verify statistical validity\n\
         - Check ethical compliance\n\
         - Ask exactly one question per turn\n\
         \n\
         Abstract: {abstract_text}",
        focus_areas.join(", ")
    );
    Persona {
        text,
        temperature: Some(rigor_to_temperature(rigor)),
    }
}

/// Persona for the author defending the paper under review.
pub fn review_author(title: &str, abstract_text: &str) -> Persona {
    Persona::new(format!(
        "You are the author of \"{title}\". Your task:\n\
         - Defend your methodology and results\n\
         - Provide additional evidence from the paper\n\
         - Address reviewer concerns professionally\n\
         - Reference specific sections\n\
         - Maintain an academic tone\n\
         \n\
         Abstract: {abstract_text}\n\
         \n\
         Relevant excerpts from the paper:\n\
         {{context}}"
    ))
}
