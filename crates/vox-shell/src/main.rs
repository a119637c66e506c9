//! vox shell - walk a page and print speech and braille
//!
//! Usage: `vox-shell <page.html> [granularity | role] [config.json]`
//!
//! With a granularity (`object`, `word`, ...) the page is walked from top
//! to bottom at that granularity. With an ARIA role (`heading`, `link`,
//! ...) the shell jumps from match to match instead.

use std::str::FromStr;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;
use vox_a11y::AriaRole;
use vox_dom::Document;
use vox_nav::{
    BrailleDisplay, Direction, Earcon, Earcons, Granularity, MoveOutcome, NavBraille, NavConfig,
    NavOutput, NavigationManager, QueueMode, Speech, SpeechProperties, WrapPolicy,
};

/// Prints every utterance, earcon and braille line to stdout
#[derive(Debug, Clone, Copy, Default)]
struct Console;

impl Speech for Console {
    fn speak(&mut self, text: &str, mode: QueueMode, properties: Option<&SpeechProperties>) {
        let marker = match mode {
            QueueMode::Flush => ">",
            QueueMode::Queue => " ",
        };
        match properties.and_then(|p| p.pitch) {
            Some(pitch) => println!("{} {} (pitch {:.1})", marker, text, pitch),
            None => println!("{} {}", marker, text),
        }
    }

    fn stop(&mut self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}

impl Earcons for Console {
    fn play_earcon(&mut self, earcon: Earcon) {
        println!("  <{:?}>", earcon);
    }
}

impl BrailleDisplay for Console {
    fn write(&mut self, braille: &NavBraille) {
        let marks: String = braille
            .text
            .chars()
            .enumerate()
            .map(|(i, _)| {
                if i >= braille.start_index && i < braille.end_index {
                    '^'
                } else {
                    ' '
                }
            })
            .collect();
        println!("  [{}]", braille.text);
        if marks.trim().is_empty() {
            println!("   {}|", " ".repeat(braille.start_index));
        } else {
            println!("   {}", marks.trim_end());
        }
    }
}

/// What the shell does with the page
enum Mode {
    Walk(Granularity),
    Find(AriaRole),
}

fn parse_mode(arg: Option<&str>) -> Result<Mode> {
    let Some(arg) = arg else {
        return Ok(Mode::Walk(Granularity::Object));
    };
    if let Ok(granularity) = serde_json::from_value(serde_json::Value::String(arg.to_ascii_lowercase())) {
        return Ok(Mode::Walk(granularity));
    }
    match AriaRole::from_str(arg) {
        Ok(role) => Ok(Mode::Find(role)),
        Err(_) => bail!("`{}` is neither a granularity nor an ARIA role", arg),
    }
}

fn load_config(path: Option<&str>) -> Result<NavConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            NavConfig::from_json(&json).with_context(|| format!("parsing {}", path))?
        }
        None => NavConfig::default(),
    };
    // a walk that wraps would never end
    config.wrap_policy = WrapPolicy::Stop;
    Ok(config)
}

fn is_done(out: &NavOutput) -> bool {
    matches!(out.outcome, MoveOutcome::Edge | MoveOutcome::Unchanged)
}

fn run(doc: &Document, manager: &mut NavigationManager, mode: Mode) -> Result<usize> {
    let limit = manager.config().max_steps;
    let mut moves = 0;
    if let Mode::Walk(granularity) = mode {
        if granularity == Granularity::Math {
            bail!("math granularity needs a cursor inside a <math> element; walk by object instead");
        }
        if granularity != manager.granularity() {
            manager.set_granularity(doc, granularity)?;
        }
    }
    while moves < limit {
        println!("--");
        let out = match mode {
            Mode::Walk(_) => manager.next(doc, Direction::Forward)?,
            Mode::Find(role) => manager.find_next_by_role(doc, role, Direction::Forward)?,
        };
        if is_done(&out) {
            break;
        }
        moves += 1;
    }
    Ok(moves)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.first() else {
        bail!("usage: vox-shell <page.html> [granularity | role] [config.json]");
    };
    let mode = parse_mode(args.get(1).map(String::as_str))?;
    let config = load_config(args.get(2).map(String::as_str))?;

    let html = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let doc = vox_html::parse_with_url(&html, &format!("file://{}", path));
    tracing::info!("loaded {} ({} nodes)", path, doc.tree().len());

    let mut manager = NavigationManager::with_output(
        config,
        Box::new(Console),
        Box::new(Console),
        Box::new(Console),
    );
    let moves = run(&doc, &mut manager, mode)?;
    tracing::info!("{} moves", moves);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert!(matches!(parse_mode(None).unwrap(), Mode::Walk(Granularity::Object)));
        assert!(matches!(parse_mode(Some("Word")).unwrap(), Mode::Walk(Granularity::Word)));
        assert!(matches!(parse_mode(Some("heading")).unwrap(), Mode::Find(AriaRole::Heading)));
        assert!(parse_mode(Some("nonsense")).is_err());
    }

    #[test]
    fn test_walk_stops_at_end() {
        let doc = vox_html::parse("<h1>Title</h1><p>Body text.</p>");
        let mut manager = NavigationManager::new(load_config(None).unwrap());
        assert_eq!(run(&doc, &mut manager, Mode::Walk(Granularity::Object)).unwrap(), 2);

        let mut manager = NavigationManager::new(load_config(None).unwrap());
        assert_eq!(run(&doc, &mut manager, Mode::Walk(Granularity::Word)).unwrap(), 3);
    }
}
