//! Headless mode: toasts from stdin, queue snapshots as JSON on stdout.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::error::Result;
use crate::notification::{Category, Notification, NotificationQueue};

/// Split `category message` input. A lone word is an info message.
pub fn parse_line(line: &str) -> Option<(Category, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line.split_once(char::is_whitespace) {
        Some((category, message)) => Some((Category::from(category.to_string()), message.trim_start().to_string())),
        None => Some((Category::Info, line.to_string())),
    }
}

/// Run against the process stdin and stdout.
pub async fn run(queue: NotificationQueue) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    run_with(queue, stdin, tokio::io::stdout()).await
}

/// Enqueue every parsed input line and print each published snapshot.
///
/// Returns once input is exhausted and the queue has drained.
pub async fn run_with<R, W>(queue: NotificationQueue, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut rx = queue.changes();
    let mut lines = reader.lines();
    let mut input_open = true;

    loop {
        // Publishing happens under the queue lock, so an empty queue has nothing left in flight.
        if !input_open && queue.is_empty() && rx.is_empty() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => {
                        if let Some((category, message)) = parse_line(&line) {
                            queue.enqueue(message, Some(category), None);
                        }
                    }
                    None => {
                        debug!(remaining = queue.len(), "Input closed, draining queue");
                        input_open = false;
                    }
                }
            }
            snapshot = rx.recv() => {
                let Some(snapshot) = snapshot else {
                    break;
                };
                write_snapshot(&mut writer, &snapshot).await?;
            }
        }
    }

    info!("Headless run finished");
    Ok(())
}

async fn write_snapshot<W: AsyncWrite + Unpin>(writer: &mut W, snapshot: &[Notification]) -> Result<()> {
    let mut line = serde_json::to_vec(snapshot)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_category_and_message() {
        assert_eq!(
            parse_line("success Expense declaration saved"),
            Some((Category::Success, "Expense declaration saved".to_string()))
        );
        assert_eq!(
            parse_line("  error   Upload failed "),
            Some((Category::Error, "Upload failed".to_string()))
        );
    }

    #[test]
    fn test_parse_line_single_word() {
        assert_eq!(parse_line("Hello"), Some((Category::Info, "Hello".to_string())));
    }

    #[test]
    fn test_parse_line_blank() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t"), None);
    }

    #[test]
    fn test_parse_line_unknown_category() {
        assert_eq!(
            parse_line("audit Kardex updated"),
            Some((Category::Other("audit".to_string()), "Kardex updated".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_drains_queue() {
        let queue = NotificationQueue::current().unwrap();
        let input: &[u8] = b"success Saved\n\nerror Boom\n";
        let mut output = Vec::new();

        run_with(queue.clone(), input, &mut output).await.unwrap();
        assert!(queue.is_empty());

        let printed = printed_messages(&output);
        assert_eq!(printed.len(), 4);
        assert_eq!(printed[0], ["Saved"]);
        assert_eq!(printed[1], ["Saved", "Boom"]);
        // Both share the default lifetime; either may expire first
        assert_eq!(printed[2].len(), 1);
        assert!(printed[2][0] == "Saved" || printed[2][0] == "Boom");
        assert!(printed[3].is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_prints_back_to_back_lines() {
        let config = crate::config::NotificationConfig {
            default_lifetime_ms: 100,
        };
        let queue = NotificationQueue::with_config(tokio::runtime::Handle::current(), &config);
        let input: &[u8] = b"info A\ninfo B\ninfo C\n";
        let mut output = Vec::new();

        run_with(queue, input, &mut output).await.unwrap();

        let printed = printed_messages(&output);
        assert_eq!(&printed[..3], [vec!["A"], vec!["A", "B"], vec!["A", "B", "C"]]);
        assert_eq!(printed.len(), 6);
        assert!(printed[3].len() == 2 && printed[4].len() == 1);
        assert!(printed[5].is_empty());
    }

    /// Messages of each printed JSON snapshot, in output order.
    fn printed_messages(output: &[u8]) -> Vec<Vec<String>> {
        let text = std::str::from_utf8(output).unwrap();
        text.lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|n| n["message"].as_str().unwrap().to_string())
                    .collect()
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_empty_input() {
        let queue = NotificationQueue::current().unwrap();
        let input: &[u8] = b"";
        let mut output = Vec::new();

        run_with(queue, input, &mut output).await.unwrap();
        assert!(output.is_empty());
    }
}
