use std::io::Read;

use anyhow::Context;
use lispscan::{lex, TokenKind};

fn main() -> anyhow::Result<()> {
    let (name, source) = match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path))?;
            (path, source)
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            ("<stdin>".to_string(), source)
        }
    };

    println!("=== Lispscan Demo ===\n");

    let mut stream = lex(name.as_str(), source);
    let mut count = 0;
    while let Some(token) = stream.next_item() {
        match token.kind {
            TokenKind::Error => {
                anyhow::bail!("{}:{}: {}", name, token.line, token.text);
            }
            TokenKind::Space => {}
            _ => println!(
                "  {:>4}:{:<5} {:<12} {}",
                token.line, token.pos, token.kind, token
            ),
        }
        count += 1;
    }

    println!("\nTokens generated: {}", count);
    Ok(())
}
