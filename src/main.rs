use md2term::{render, render_with, scan_markdown, ToolAvailability};
use std::io::{self, Read};

fn print_help() {
    println!("md2term - Render diagram blocks from Markdown in the terminal");
    println!();
    println!("Usage: md2term [OPTIONS] [FILE]");
    println!();
    println!("Reads Markdown from FILE or stdin, extracts fenced diagram blocks");
    println!("(mermaid, d2, math, sequence) and renders each one as text.");
    println!();
    println!("Options:");
    println!("  -h, --help         Show this help message");
    println!("  -w, --width <N>    Maximum output width in columns (default: 80)");
    println!("      --no-tools     Skip external tools, use built-in renderers only");
    println!("      --json         Emit blocks and outcomes as JSON");
    println!();
    println!("Example:");
    println!("  md2term README.md");
    println!("  cat notes.md | md2term --width 100");
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return;
    }

    let mut width: usize = 80;
    let mut no_tools = false;
    let mut json = false;
    let mut file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-w" | "--width" => {
                i += 1;
                let value = args.get(i).and_then(|v| v.parse::<usize>().ok());
                match value {
                    Some(v) if v > 0 => width = v,
                    _ => {
                        eprintln!("Error: --width requires a positive number");
                        std::process::exit(1);
                    }
                }
            }
            "--no-tools" => no_tools = true,
            "--json" => json = true,
            other if other.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", other);
                std::process::exit(1);
            }
            other => file = Some(other.to_string()),
        }
        i += 1;
    }

    let document = match file {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error: Cannot read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("Error: Cannot read stdin: {}", e);
                std::process::exit(1);
            }
            buf
        }
    };

    let blocks = scan_markdown(&document);
    if blocks.is_empty() {
        eprintln!("No diagram blocks found");
        std::process::exit(1);
    }

    let no_tool_set = ToolAvailability::none();
    let results: Vec<_> = blocks
        .into_iter()
        .map(|block| {
            let outcome = if no_tools {
                render_with(&block, width, &no_tool_set)
            } else {
                render(&block, width)
            };
            (block, outcome)
        })
        .collect();

    if json {
        let items: Vec<_> = results
            .iter()
            .map(|(block, outcome)| {
                serde_json::json!({ "block": block, "outcome": outcome })
            })
            .collect();
        match serde_json::to_string_pretty(&items) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    for (block, outcome) in results {
        println!(
            "── {} [{}] lines {}-{} via {:?} ──",
            block.dialect.tag(),
            block.subtype.as_str(),
            block.start_line + 1,
            block.end_line + 1,
            outcome.tool
        );
        if let Some(detail) = &outcome.error_detail {
            eprintln!("warning: {}", detail);
        }
        println!("{}", outcome.rendered);
        println!();
    }
}
