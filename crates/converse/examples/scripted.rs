//! Stream one turn over the scripted transport and print it as it arrives.
//!
//! ```sh
//! RUST_LOG=converse=debug cargo run -p converse --example scripted --features testing
//! ```

use converse::{
    BlockKind, Builder, Conversation, Role, StopReason, StreamEvent, Usage, testing::Scripted,
};
use futures_util::StreamExt;
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut events = vec![
        StreamEvent::MessageStart {
            role: Role::Assistant,
        },
        StreamEvent::ContentBlockStart {
            index: 0,
            kind: BlockKind::Text,
        },
    ];
    for word in ["Rust ", "is ", "a ", "systems ", "language."] {
        events.push(StreamEvent::ContentBlockDelta {
            index: 0,
            fragment: word.into(),
        });
    }
    events.push(StreamEvent::ContentBlockStop { index: 0 });
    events.push(StreamEvent::MessageStop {
        stop_reason: Some(StopReason::EndTurn),
    });
    events.push(StreamEvent::Metadata {
        usage: Some(Usage {
            input_tokens: 12,
            output_tokens: 5,
            total_tokens: 17,
        }),
        metrics: None,
    });

    let mut builder = Builder::new("nova_lite")?;
    builder
        .system("Answer in one sentence.")
        .max_tokens(128)
        .temperature(0.3);
    builder.prompt("What is Rust?")?;

    let mut conversation = Conversation::new(builder, Scripted::new().events(events));
    let pending = {
        let (stream, pending) = conversation.converse_stream()?;
        futures_util::pin_mut!(stream);
        while let Some(segment) = stream.next().await {
            print!("{}", segment?.text);
            std::io::stdout().flush()?;
        }
        println!();
        pending
    };

    let message = pending.await?;
    tracing::info!(
        "history has {} messages, last from {}",
        conversation.history().len(),
        message.role
    );
    Ok(())
}
