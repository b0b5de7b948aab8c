//! Interactive yes/no confirmation

use std::future::Future;
use std::io;

use console::Term;
use s3t_core::Error;

/// Ask `question` on the terminal, defaulting to yes on an empty answer
///
/// Unrecognized answers repeat the question. The terminal read runs on the
/// blocking pool; Ctrl+C while waiting resolves to `Aborted`.
pub async fn confirm(question: String) -> s3t_core::Result<bool> {
    let answer = tokio::task::spawn_blocking(move || ask(&Term::stderr(), &question));
    interruptible(answer, tokio::signal::ctrl_c()).await
}

/// Wait for `answer` unless `interrupt` fires first
async fn interruptible<A, I>(answer: A, interrupt: I) -> s3t_core::Result<bool>
where
    A: Future<Output = Result<io::Result<bool>, tokio::task::JoinError>>,
    I: Future<Output = io::Result<()>>,
{
    tokio::select! {
        joined = answer => match joined {
            Ok(Ok(answer)) => Ok(answer),
            Ok(Err(e)) if e.kind() == io::ErrorKind::Interrupted => Err(Error::Aborted),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(Error::Aborted),
        },
        _ = interrupt => Err(Error::Aborted),
    }
}

fn ask(term: &Term, question: &str) -> io::Result<bool> {
    loop {
        term.write_str(&format!("{question} [Y/n] "))?;
        let line = term.read_line()?;
        if let Some(answer) = parse_answer(&line) {
            return Ok(answer);
        }
        term.write_line("Please answer 'y' or 'n'.")?;
    }
}

fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer(""), Some(true));
        assert_eq!(parse_answer("Y\n"), Some(true));
        assert_eq!(parse_answer(" yes "), Some(true));
        assert_eq!(parse_answer("n"), Some(false));
        assert_eq!(parse_answer("NO"), Some(false));
        assert_eq!(parse_answer("maybe"), None);
    }

    #[tokio::test]
    async fn test_interrupt_while_waiting_aborts() {
        let pending = std::future::pending::<Result<io::Result<bool>, tokio::task::JoinError>>();
        let err = interruptible(pending, std::future::ready(Ok(())))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Aborted));
    }

    #[tokio::test]
    async fn test_interrupted_read_aborts() {
        let answer = std::future::ready(Ok(Err(io::Error::from(io::ErrorKind::Interrupted))));
        let err = interruptible(answer, std::future::pending())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Aborted));
    }

    #[tokio::test]
    async fn test_answer_passes_through() {
        let answer = std::future::ready(Ok(Ok(false)));
        let declined = interruptible(answer, std::future::pending()).await.unwrap();
        assert!(!declined);
    }
}
