use std::sync::Arc;

use clap::Parser;
use uuid::Uuid;

use dualbot::{DebateSession, Engine, InterviewSession, ReviewSession, Role, SessionModels};

use crate::args::{CliArgs, Command, PaperArgs};
use crate::config::{load_config, EngineConfig};
use crate::logging::init_logging;
use crate::paper::Paper;
use crate::render::{section, spawn_printer};

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    init_logging(&loaded.config.logging, &loaded.paths)?;
    if !loaded.config_exists {
        log::info!(
            "no config at {}, using defaults",
            loaded.paths.config_file.display()
        );
    }

    let engine = build_engine(&args, &loaded.config.engine)?;
    let models = &loaded.config.models;
    let run_id = Uuid::new_v4();
    log::info!("run {run_id}: {engine:?}");

    match args.command {
        Command::Debate {
            scenario,
            first_role,
            first_stance,
            second_role,
            second_stance,
            length,
        } => {
            let roles = (
                role(first_role, first_stance),
                role(second_role, second_stance),
            );
            run_debate(&engine, models, roles, &scenario, &length).await
        }
        Command::Digest { topic, paper } => run_digest(&engine, models, &topic, paper).await,
        Command::Review {
            title,
            paper,
            focus_areas,
            rigor,
        } => run_review(&engine, models, &title, paper, &focus_areas, rigor).await,
    }
}

fn build_engine(args: &CliArgs, config: &EngineConfig) -> anyhow::Result<Engine> {
    let id = args.engine.as_deref().unwrap_or(&config.id);
    let api_key =
        config.resolve_api_key(args.api_key.as_deref(), |name| std::env::var(name).ok());
    let mut engine = Engine::new(id, api_key)?;
    if let Some(url) = args.base_url.clone().or_else(|| config.base_url.clone()) {
        engine = engine.with_base_url(url);
    }
    if let Some(timeout) = config.timeout_seconds {
        engine = engine.with_timeout(timeout);
    }
    if let Some(resilience) = &config.resilience {
        engine = engine.with_resilience(resilience.clone());
    }
    Ok(engine)
}

fn role(name: String, stance: Option<String>) -> Role {
    match stance {
        Some(stance) => Role::new(name).with_stance(stance),
        None => Role::new(name),
    }
}

async fn run_debate(
    engine: &Engine,
    models: &SessionModels,
    roles: (Role, Role),
    scenario: &str,
    length: &str,
) -> anyhow::Result<()> {
    let mut session = DebateSession::with_models(engine, models, roles, scenario, length).await?;
    println!("Debate: {scenario} ({} rounds)\n", session.rounds());
    let printer = spawn_printer(session.create_event_channel());

    while session.remaining_rounds() > 0 {
        session.step().await?;
    }
    session.ensure_finished()?;
    let summary = session.summarize().await?;
    drop(session);
    printer.await?;

    section("Debate summary", &summary);
    Ok(())
}

/// Abstract from the flag, else the one found in the paper.
fn load_paper(args: PaperArgs) -> anyhow::Result<(Paper, String)> {
    let paper = Paper::load(&args.paper)?;
    let abstract_text = args
        .abstract_text
        .unwrap_or_else(|| paper.abstract_text().to_string());
    Ok((paper, abstract_text))
}

async fn run_digest(
    engine: &Engine,
    models: &SessionModels,
    topic: &str,
    paper: PaperArgs,
) -> anyhow::Result<()> {
    let (paper, abstract_text) = load_paper(paper)?;
    let retriever = Arc::new(paper.index());
    let mut session =
        InterviewSession::with_models(engine, models, topic, &abstract_text, retriever).await?;
    println!("Interview on {topic}\n");
    let printer = spawn_printer(session.create_event_channel());

    while session.remaining_rounds() > 0 {
        let qa = session.step().await?;
        log::debug!("answer {} drew on {} passages", qa.round, qa.passages.len());
    }
    let summary = session.summarize().await?;
    drop(session);
    printer.await?;

    section("Interview summary", &summary);
    Ok(())
}

async fn run_review(
    engine: &Engine,
    models: &SessionModels,
    title: &str,
    paper: PaperArgs,
    focus_areas: &[String],
    rigor: u32,
) -> anyhow::Result<()> {
    let (paper, abstract_text) = load_paper(paper)?;
    let retriever = Arc::new(paper.index());
    let mut session = ReviewSession::with_models(
        engine,
        models,
        title,
        &abstract_text,
        retriever,
        focus_areas,
        rigor,
    )
    .await?;
    println!("Review of {title}\n");
    let printer = spawn_printer(session.create_event_channel());

    while session.remaining_rounds() > 0 {
        let qa = session.step().await?;
        log::debug!("response {} drew on {} passages", qa.round, qa.passages.len());
    }
    let verdict = session.generate_verdict().await?;
    let critiques = session.summarize_critiques().await?;
    let responses = session.summarize_responses().await?;
    drop(session);
    printer.await?;

    section("Verdict", &verdict);
    section("Critique summary", &critiques);
    section("Author response summary", &responses);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualbot::LLMBackend;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["dualbot"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["debate", "--scenario", "s"]);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn engine_flag_overrides_config() {
        let config = EngineConfig {
            api_key: Some("sk".into()),
            ..EngineConfig::default()
        };
        let engine = build_engine(&args(&["--engine", "ollama"]), &config).expect("engine");
        assert_eq!(engine.backend(), LLMBackend::Ollama);
    }

    #[test]
    fn unknown_engine_is_an_error() {
        let config = EngineConfig {
            id: "palm".into(),
            ..EngineConfig::default()
        };
        assert!(build_engine(&args(&[]), &config).is_err());
    }

    #[test]
    fn stance_is_optional() {
        assert_eq!(role("Pro".into(), None).stance, None);
        assert_eq!(
            role("Pro".into(), Some("for".into())).stance.as_deref(),
            Some("for")
        );
    }
}
