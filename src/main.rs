use std::env;
use std::process::ExitCode;

use log::debug;
use recipe_finder::{
    AiConfig, Classification, RecipeError, RecipeFinder, RecipeSession, Section,
    NOT_FOOD_MESSAGE,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};

const USAGE: &str = "Usage: recipe-finder [--json] [QUERY...]

With a query, prints one recipe and exits. Without one, reads a query per
line from stdin. Type `reset` to clear the current search, `quit` to exit.";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let mut json = false;
    let mut words = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return ExitCode::SUCCESS;
            }
            _ => words.push(arg),
        }
    }

    let session = match AiConfig::load()
        .map_err(RecipeError::from)
        .and_then(|config| RecipeFinder::from_config(&config))
    {
        Ok(finder) => RecipeSession::new(finder),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("Using provider {}", session.finder().provider_name());

    if !words.is_empty() {
        let query = words.join(" ");
        return if search(&session, &query, json).await {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        eprint!("Search for any recipe: ");
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                return ExitCode::FAILURE;
            }
        };

        match line.trim() {
            "quit" | "exit" => break,
            "reset" => session.reset(),
            query => {
                search(&session, query, json).await;
            }
        }
    }

    ExitCode::SUCCESS
}

/// Run one search and print the outcome. Returns false on failure.
async fn search(session: &RecipeSession, query: &str, json: bool) -> bool {
    match session.search(query).await {
        Ok(Classification::Recipe(recipe)) => {
            if json {
                match serde_json::to_string_pretty(&recipe.sections()) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to encode recipe: {}", e);
                        return false;
                    }
                }
            } else {
                print!("{}", render(&recipe.sections()));
            }
            true
        }
        Ok(Classification::Rejected) => {
            eprintln!("{}", NOT_FOOD_MESSAGE);
            true
        }
        Err(e) => {
            eprintln!("{}", e);
            false
        }
    }
}

/// Lay out sections for a terminal: headings get a gap above and an underline
fn render(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        match section {
            Section::Heading { text, .. } => {
                out.push('\n');
                out.push_str(text);
                out.push('\n');
                out.push_str(&"=".repeat(text.chars().count()));
                out.push('\n');
            }
            Section::Paragraph { text } => {
                out.push_str(text);
                out.push('\n');
            }
            Section::Blank => out.push('\n'),
        }
    }
    out
}
