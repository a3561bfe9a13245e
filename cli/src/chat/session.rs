//! Chat session: transcript plus the deferred, cancellable assistant reply.
//!
//! `submit` appends the user turn immediately and queues one reply job. A single
//! responder task owns the queue and waits until each job's deadline
//! (submission time + thinking delay) before answering, so replies arrive in
//! submission order and back-to-back submissions do not stack their delays.
//! `next_reply` receives the answer and appends the assistant turn.
//!
//! Cancelling a `PendingReply`, or closing the session, guarantees the reply is
//! never appended: the responder skips cancelled jobs and the session re-checks
//! the flag before appending anything it receives.

use super::transcript::{ConversationTurn, Role, Transcript};
use crate::core::error::{FolioError, Result};
use crate::matcher::{ResponseMatcher, Topic};
use anyhow::anyhow;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Handle to one scheduled assistant reply.
#[derive(Debug, Clone)]
pub struct PendingReply {
    seq: u64,
    cancelled: Arc<AtomicBool>,
}

impl PendingReply {
    /// Drops the reply. Has no effect once it has been appended.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Submission sequence number, starting at 1.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

struct ReplyJob {
    seq: u64,
    input: String,
    deadline: Instant,
    cancelled: Arc<AtomicBool>,
}

struct Reply {
    seq: u64,
    topic: Topic,
    text: String,
}

pub struct ChatSession {
    matcher: Arc<ResponseMatcher>,
    delay: Duration,
    transcript: Transcript,
    jobs: Option<mpsc::UnboundedSender<ReplyJob>>,
    replies: mpsc::UnboundedReceiver<Reply>,
    worker: Option<JoinHandle<()>>,
    pending: BTreeMap<u64, PendingReply>,
    next_seq: u64,
    last_topic: Option<Topic>,
}

impl ChatSession {
    /// Opens a session with the welcome turn. Must be called inside a tokio runtime.
    pub fn new(matcher: Arc<ResponseMatcher>, delay: Duration) -> Self {
        let (job_tx, job_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_responder(Arc::clone(&matcher), job_rx, reply_tx));

        let mut transcript = Transcript::new();
        transcript.append(Role::Assistant, matcher.response_for(Topic::Welcome));
        info!("Chat session opened (thinking delay {:?})", delay);

        Self {
            matcher,
            delay,
            transcript,
            jobs: Some(job_tx),
            replies: reply_rx,
            worker: Some(worker),
            pending: BTreeMap::new(),
            next_seq: 1,
            last_topic: None,
        }
    }

    /// Appends the user turn and schedules the assistant reply.
    ///
    /// Empty or whitespace-only text is rejected without touching the transcript.
    /// Otherwise the user turn keeps the text exactly as submitted.
    pub fn submit(&mut self, text: &str) -> Result<PendingReply> {
        let jobs = self
            .jobs
            .as_ref()
            .ok_or_else(|| anyhow!(FolioError::SessionClosed))?;
        if text.trim().is_empty() {
            return Err(anyhow!(FolioError::EmptySubmission));
        }

        let seq = self.next_seq;
        let handle = PendingReply {
            seq,
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        let job = ReplyJob {
            seq,
            input: text.to_string(),
            deadline: Instant::now() + self.delay,
            cancelled: Arc::clone(&handle.cancelled),
        };
        jobs.send(job)
            .map_err(|_| anyhow!(FolioError::SessionClosed))?;

        self.next_seq += 1;
        self.transcript.append(Role::User, text);
        self.pending.insert(seq, handle.clone());
        debug!("Queued reply #{} for {:?}", seq, text);
        Ok(handle)
    }

    /// Waits for the next reply and appends it. Returns `None` when nothing is pending.
    pub async fn next_reply(&mut self) -> Option<&ConversationTurn> {
        loop {
            self.pending.retain(|_, h| !h.is_cancelled());
            if self.pending.is_empty() {
                return None;
            }
            let reply = self.replies.recv().await?;
            let Some(handle) = self.pending.remove(&reply.seq) else {
                continue;
            };
            if handle.is_cancelled() {
                debug!("Discarding cancelled reply #{}", reply.seq);
                continue;
            }
            self.last_topic = Some(reply.topic);
            return Some(self.transcript.append(Role::Assistant, reply.text));
        }
    }

    /// Cancels every pending reply and stops the responder. Idempotent.
    pub fn close(&mut self) {
        for handle in self.pending.values() {
            handle.cancel();
        }
        self.pending.clear();
        self.jobs = None;
        if let Some(worker) = self.worker.take() {
            worker.abort();
            info!("Chat session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.jobs.is_none()
    }

    /// Number of replies scheduled but not yet appended or cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.values().filter(|h| !h.is_cancelled()).count()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Topic of the most recently appended assistant reply.
    pub fn last_topic(&self) -> Option<Topic> {
        self.last_topic
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn matcher(&self) -> &ResponseMatcher {
        &self.matcher
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_responder(
    matcher: Arc<ResponseMatcher>,
    mut jobs: mpsc::UnboundedReceiver<ReplyJob>,
    replies: mpsc::UnboundedSender<Reply>,
) {
    while let Some(job) = jobs.recv().await {
        tokio::time::sleep_until(job.deadline).await;
        if job.cancelled.load(Ordering::SeqCst) {
            debug!("Reply #{} cancelled before delivery", job.seq);
            continue;
        }
        let topic = matcher.classify(&job.input);
        let reply = Reply {
            seq: job.seq,
            topic,
            text: matcher.response_for(topic).to_string(),
        };
        if replies.send(reply).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatcherOptions;
    use crate::profile::ProfileFacts;

    fn session(delay_ms: u64) -> ChatSession {
        let profile = ProfileFacts::sample().unwrap();
        let matcher = ResponseMatcher::new(&profile, &MatcherOptions::default()).unwrap();
        ChatSession::new(Arc::new(matcher), Duration::from_millis(delay_ms))
    }

    #[tokio::test]
    async fn test_opens_with_welcome() {
        let s = session(0);
        assert_eq!(s.transcript().len(), 1);
        let first = &s.transcript().turns()[0];
        assert_eq!(first.role, Role::Assistant);
        assert!(first.text.contains("How can I help you today?"));
    }

    #[tokio::test]
    async fn test_submit_then_reply() {
        let mut s = session(5);
        s.submit("contact").unwrap();
        assert_eq!(s.transcript().len(), 2);
        assert_eq!(s.transcript().last().unwrap().role, Role::User);

        let reply = s.next_reply().await.unwrap().clone();
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.text.contains("alex.rivera@example.com"));
        assert_eq!(s.last_topic(), Some(Topic::Contact));
        assert_eq!(s.transcript().len(), 3);
        assert!(s.next_reply().await.is_none());
    }

    #[tokio::test]
    async fn test_user_turn_keeps_submitted_text() {
        let mut s = session(0);
        s.submit("  What are your Skills?  ").unwrap();
        assert_eq!(s.transcript().last().unwrap().text, "  What are your Skills?  ");

        s.next_reply().await.unwrap();
        assert_eq!(s.last_topic(), Some(Topic::Skills));
    }

    #[tokio::test]
    async fn test_empty_submission_rejected() {
        let mut s = session(0);
        let err = s.submit("   \t").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FolioError>(),
            Some(FolioError::EmptySubmission)
        ));
        assert_eq!(s.transcript().len(), 1);
        assert_eq!(s.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_replies_arrive_in_submission_order() {
        let mut s = session(10);
        s.submit("skills").unwrap();
        s.submit("xyzzyplugh").unwrap();
        s.submit("hello").unwrap();

        let mut topics = Vec::new();
        while s.next_reply().await.is_some() {
            topics.push(s.last_topic().unwrap());
        }
        assert_eq!(topics, vec![Topic::Skills, Topic::Fallback, Topic::Greeting]);

        let roles: Vec<Role> = s.transcript().turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Assistant,
                Role::User,
                Role::User,
                Role::User,
                Role::Assistant,
                Role::Assistant,
                Role::Assistant,
            ]
        );
    }

    #[tokio::test]
    async fn test_cancelled_reply_is_never_appended() {
        let mut s = session(10);
        let first = s.submit("education").unwrap();
        s.submit("languages").unwrap();
        first.cancel();
        assert_eq!(s.pending_count(), 1);

        let reply = s.next_reply().await.unwrap().clone();
        assert!(reply.text.starts_with("🌐 Language Proficiency"));
        assert!(s.next_reply().await.is_none());
        assert_eq!(s.transcript().by_role(Role::Assistant).count(), 2);
    }

    #[tokio::test]
    async fn test_close_cancels_pending() {
        let mut s = session(20);
        let handle = s.submit("projects").unwrap();
        s.close();

        assert!(handle.is_cancelled());
        assert!(s.is_closed());
        assert!(s.next_reply().await.is_none());
        assert_eq!(s.transcript().len(), 2);

        let err = s.submit("hello").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FolioError>(),
            Some(FolioError::SessionClosed)
        ));
    }

    #[tokio::test]
    async fn test_delay_is_respected() {
        let mut s = session(30);
        let started = std::time::Instant::now();
        s.submit("hobby").unwrap();
        s.next_reply().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
