use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::Parser;
use html::Selector;
use spa::Key;

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Load a documentation page and replay interactions against it headlessly")]
pub struct Cli {
    /// Page to start on, e.g. http://localhost:8000/md/handbook/intro
    pub url: String,
    /// TOML file with navigator settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Interaction to replay, in order: click:SEL, hover:SEL, key:NAME, search:TEXT, goto:HREF,
    /// back, forward, wait:MS
    #[arg(short = 'x', long = "do")]
    pub actions: Vec<Action>,
    /// Lines of main content outline to print at the end
    #[arg(long, default_value = "40")]
    pub outline: usize,
}

#[derive(Clone, Debug)]
pub enum Action {
    Click(Selector),
    Hover(Selector),
    Key(Key),
    Search(String),
    Goto(String),
    Back,
    Forward,
    Wait(u64),
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = s.split_once(':').unwrap_or((s, ""));
        let selector = || Selector::parse(arg).with_context(|| format!("in action {s:?}"));
        Ok(match verb {
            "click" => Action::Click(selector()?),
            "hover" => Action::Hover(selector()?),
            "key" => Action::Key(Key::from_name(arg)),
            "search" => Action::Search(arg.to_string()),
            "goto" => Action::Goto(arg.to_string()),
            "back" => Action::Back,
            "forward" => Action::Forward,
            "wait" => Action::Wait(arg.parse().with_context(|| format!("bad wait in {s:?}"))?),
            other => bail!("unknown action {other:?}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions() {
        assert!(matches!("click:#link-b".parse::<Action>(), Ok(Action::Click(_))));
        assert!(matches!("key:ArrowDown".parse::<Action>(), Ok(Action::Key(Key::ArrowDown))));
        assert!(matches!("search:intro".parse::<Action>(), Ok(Action::Search(q)) if q == "intro"));
        assert!(matches!("wait:250".parse::<Action>(), Ok(Action::Wait(250))));
        assert!(matches!("back".parse::<Action>(), Ok(Action::Back)));
        assert!("wait:soon".parse::<Action>().is_err());
        assert!("click:.a .b".parse::<Action>().is_err());
        assert!("dance".parse::<Action>().is_err());
    }

    #[test]
    fn parses_command_line() {
        let cli = Cli::try_parse_from([
            "docnav",
            "http://localhost:8000/md/docs/a",
            "-x",
            "hover:#link-b",
            "--do",
            "click:#link-b",
        ])
        .unwrap();
        assert_eq!(cli.actions.len(), 2);
        assert_eq!(cli.outline, 40);
        assert!(cli.config.is_none());
    }
}
