use dualbot::ExchangeEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Prints exchange events to stdout until the session drops its sender.
pub fn spawn_printer(mut events: mpsc::UnboundedReceiver<ExchangeEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if let Some(line) = format_event(&event) {
                println!("{line}");
            }
        }
    })
}

pub fn format_event(event: &ExchangeEvent) -> Option<String> {
    match event {
        ExchangeEvent::Started { rounds } => Some(format!("--- {rounds} rounds ---")),
        ExchangeEvent::TurnCompleted {
            round,
            speaker,
            text,
        } => Some(format!("[{round}] {speaker}:\n{text}\n")),
        ExchangeEvent::RoundCompleted { .. } => None,
        ExchangeEvent::Completed { rounds } => {
            Some(format!("--- finished after {rounds} rounds ---"))
        }
        ExchangeEvent::Failed { round, message } => {
            Some(format!("--- round {round} failed: {message} ---"))
        }
    }
}

pub fn section(title: &str, body: &str) {
    println!("\n== {title} ==\n{body}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_show_round_and_speaker() {
        let event = ExchangeEvent::TurnCompleted {
            round: 2,
            speaker: "Opponent".into(),
            text: "Cars are essential.".into(),
        };
        assert_eq!(
            format_event(&event).as_deref(),
            Some("[2] Opponent:\nCars are essential.\n")
        );
    }

    #[test]
    fn round_boundaries_are_silent() {
        assert_eq!(format_event(&ExchangeEvent::RoundCompleted { round: 1 }), None);
    }

    #[tokio::test]
    async fn printer_stops_when_sender_drops() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_printer(rx);
        tx.send(ExchangeEvent::Completed { rounds: 4 }).expect("send");
        drop(tx);
        handle.await.expect("printer");
    }
}
