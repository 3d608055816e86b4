use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dualbot",
    about = "Run scripted two-agent conversations: debates, paper interviews and peer reviews"
)]
pub struct CliArgs {
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    /// Engine id: openai, deepseek or ollama.
    #[arg(long, short = 'e', global = true)]
    pub engine: Option<String>,
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Two debaters argue a scenario, then the debate is summarized.
    Debate {
        #[arg(long)]
        scenario: String,
        #[arg(long, default_value = "Proponent")]
        first_role: String,
        #[arg(long)]
        first_stance: Option<String>,
        #[arg(long, default_value = "Opponent")]
        second_role: String,
        #[arg(long)]
        second_stance: Option<String>,
        /// Short (4 rounds) or Long (8 rounds).
        #[arg(long, default_value = "Short")]
        length: String,
    },
    /// A journalist interviews the author of a paper.
    Digest {
        #[arg(long)]
        topic: String,
        #[command(flatten)]
        paper: PaperArgs,
    },
    /// A reviewer questions the author, then issues a verdict.
    Review {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        paper: PaperArgs,
        /// Comma separated or repeated.
        #[arg(long = "focus", value_delimiter = ',')]
        focus_areas: Vec<String>,
        /// 0 (lenient) to 100 (strict).
        #[arg(long, default_value_t = 50)]
        rigor: u32,
    },
}

#[derive(clap::Args, Debug)]
pub struct PaperArgs {
    /// Plain-text paper the author answers from.
    #[arg(long)]
    pub paper: PathBuf,
    /// Abstract text; read from the first paragraph of the paper when omitted.
    #[arg(long = "abstract")]
    pub abstract_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debate_defaults_roles_and_length() {
        let args = CliArgs::parse_from(["dualbot", "debate", "--scenario", "Ban cars"]);
        match args.command {
            Command::Debate {
                first_role,
                second_role,
                length,
                ..
            } => {
                assert_eq!(first_role, "Proponent");
                assert_eq!(second_role, "Opponent");
                assert_eq!(length, "Short");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn review_splits_focus_areas() {
        let args = CliArgs::parse_from([
            "dualbot",
            "--engine",
            "deepseek",
            "review",
            "--title",
            "T",
            "--paper",
            "paper.txt",
            "--focus",
            "methodology,novelty",
            "--focus",
            "clarity",
            "--rigor",
            "80",
        ]);
        assert_eq!(args.engine.as_deref(), Some("deepseek"));
        match args.command {
            Command::Review {
                focus_areas, rigor, ..
            } => {
                assert_eq!(focus_areas, ["methodology", "novelty", "clarity"]);
                assert_eq!(rigor, 80);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
