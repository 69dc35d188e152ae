//! Create the team's Slack channels with their topics. Channels that already
//! exist are left alone.

use anyhow::Result;
use slack::{SlackClient, SlackError};
use tracing::warn;

/// Channels to create: (name, topic).
const CHANNELS: &[(&str, &str)] = &[
    (
        "standup",
        "Daily: Yesterday, Today, Blockers. Keep it async.",
    ),
    (
        "leads",
        "Target tracking, cold outreach results, and pipeline updates.",
    ),
    (
        "sprint-planning",
        "Bi-weekly prioritization, validation gates, and retro.",
    ),
    (
        "research",
        "NotebookLM insights, market data, and industry reports.",
    ),
];

/// Run the Slack workspace setup.
///
/// Existing channels (`name_taken`) are skipped with a notice; other
/// per-channel failures are reported and skipped. Topic failures leave the
/// channel in place.
pub async fn run(client: &SlackClient) -> Result<()> {
    let mut created = 0;
    for (name, topic) in CHANNELS {
        println!("Creating #{name}...");
        let channel = match client.create_channel(name).await {
            Ok(channel) => channel,
            Err(SlackError::NameTaken) => {
                println!("  #{name} already exists, skipping.");
                continue;
            }
            Err(e) => {
                warn!("Failed to create #{name}: {e}");
                continue;
            }
        };
        println!("  Created (ID: {})", channel.id);
        created += 1;

        match client.set_topic(&channel.id, topic).await {
            Ok(()) => println!("  Topic set: '{topic}'"),
            Err(e) => warn!("Failed to set topic on #{name}: {e}"),
        }
    }

    println!("\nDone. Created {created} channel(s).");
    Ok(())
}
