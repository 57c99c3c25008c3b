//! One full session: intake, two streamed turns, summary and mind map.
//!
//! Set MIND_MIRROR_API_KEY (an `sk-or-` key routes through OpenRouter,
//! anything else goes to Anthropic), then run:
//!   RUST_LOG=mirror_provider=debug cargo run --example chat -p mirror --features full

use std::io::Write;

use mirror::prelude::*;
use tracing_subscriber::EnvFilter;

/// Prints fragments as they arrive.
struct Stdout;

impl ChatSink for Stdout {
    fn on_delta(&mut self, text: &str) {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }

    fn on_done(&mut self) {
        println!("\n");
    }

    fn on_error(&mut self, error: ChatError) {
        eprintln!("\n[error] {error}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = MirrorClient::from_env();
    let persona = PersonaId::Detective;
    let profile = persona.profile();
    println!("--- {} ({}) ---\n", profile.name, profile.title);

    let intake = Intake {
        text_type: "Novel".into(),
        topic_genre: "Literary sci-fi".into(),
        progress: "Two chapters drafted".into(),
        last_written: "The launch scene, where the sister stays behind".into(),
    };
    let opening = intake.to_message().ok_or("intake incomplete")?;

    let mut conversation = Conversation::new();
    run_turn(&client, persona, &mut conversation, &opening, Stdout).await?;

    conversation.toggle_dont_repeat();
    run_turn(
        &client,
        persona,
        &mut conversation,
        "I think the sister is the real protagonist, but I keep writing from the brother's view.",
        Stdout,
    )
    .await?;

    let transcript = conversation.artifact_transcript()?.to_vec();

    match client.generate_summary(&transcript).await {
        Ok(summary) => {
            println!("Starting point: {}", summary.starting_point);
            for assumption in &summary.assumptions {
                println!("  - {assumption}");
            }
            println!("End result: {}\n", summary.end_result);
        }
        Err(e) => eprintln!("summary failed: {e}"),
    }

    match client.generate_mind_map(&transcript).await {
        Ok(map) => {
            let graph = layout_mind_map(&map)?;
            for node in &graph.nodes {
                println!(
                    "{:>6.0} {:>6.0}  {}{}",
                    node.position.x,
                    node.position.y,
                    "  ".repeat(node.rank),
                    node.label
                );
            }
        }
        Err(e) => eprintln!("mind map failed: {e}"),
    }

    Ok(())
}
