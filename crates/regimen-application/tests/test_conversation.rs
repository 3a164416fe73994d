use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use regimen_application::prompts::{
    CHAT_APOLOGY, EMPTY_SELECTION_GUIDANCE, GENERATING_PLACEHOLDER, GREETING, ROUTINE_APOLOGY,
};
use regimen_application::{
    ChatOutcome, ConversationController, PickerSession, RoutineOutcome, SessionHandle,
};
use regimen_core::catalog::{Catalog, Product};
use regimen_core::config::AppConfig;
use regimen_core::generation::{GenerationClient, GenerationError};
use regimen_core::projection::View;
use regimen_core::selection::MemorySelectionStore;
use regimen_core::session::{ChatMessage, GenerationState, MessageRole};
use tokio::sync::oneshot;

type Reply = Result<String, GenerationError>;

/// Answers each call from a fixed script and records what was sent.
struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn send(&self, messages: &[ChatMessage]) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerationError::MalformedResponse))
    }
}

/// Each call blocks until the test releases the matching gate.
struct GatedClient {
    gates: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl GatedClient {
    fn new(count: usize) -> (Arc<Self>, Vec<oneshot::Sender<Reply>>) {
        let mut senders = Vec::new();
        let mut receivers = VecDeque::new();
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            receivers.push_back(rx);
        }
        let client = Arc::new(Self {
            gates: Mutex::new(receivers),
            calls: Mutex::new(Vec::new()),
        });
        (client, senders)
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.call_count() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("client was not called in time");
    }
}

#[async_trait]
impl GenerationClient for GatedClient {
    async fn send(&self, messages: &[ChatMessage]) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(GenerationError::Transport("gate dropped".to_string()))),
            None => Err(GenerationError::Transport("unexpected call".to_string())),
        }
    }
}

fn catalog() -> Catalog {
    let products = [
        (1, "Hydrating Cleanser", "CeraVe", "cleanser"),
        (2, "Revitalift Serum", "L'Oreal Paris", "skincare"),
        (3, "Elvive Shampoo", "L'Oreal Paris", "haircare"),
    ];
    Catalog::new(
        products
            .into_iter()
            .map(|(id, name, brand, category)| Product {
                id,
                name: name.to_string(),
                brand: brand.to_string(),
                category: category.to_string(),
                description: format!("{name} description"),
                image: format!("img/{id}.jpg"),
            })
            .collect(),
    )
}

fn controller(client: Arc<dyn GenerationClient>) -> ConversationController {
    let session = PickerSession::new(
        catalog(),
        Arc::new(MemorySelectionStore::new()),
        &AppConfig::default(),
    );
    ConversationController::new(SessionHandle::new(session), client)
}

fn contents(controller: &ConversationController) -> Vec<String> {
    controller
        .session()
        .lock()
        .transcript()
        .entries()
        .iter()
        .map(|entry| entry.content.clone())
        .collect()
}

fn has_transient(controller: &ConversationController) -> bool {
    controller
        .session()
        .lock()
        .transcript()
        .entries()
        .iter()
        .any(|entry| entry.transient)
}

// ============================================================================
// Routine generation
// ============================================================================

#[tokio::test]
async fn test_empty_selection_never_calls_client() {
    let client = ScriptedClient::new(vec![Ok("unused".to_string())]);
    let controller = controller(client.clone());

    let outcome = controller.generate_routine().await;

    assert_eq!(outcome, RoutineOutcome::EmptySelection);
    assert!(client.calls().is_empty());
    assert_eq!(contents(&controller), vec![GREETING, EMPTY_SELECTION_GUIDANCE]);
    let session = controller.session().lock();
    assert_eq!(session.generation_state(), GenerationState::Idle);
    assert!(!session.controls_view().copy_enabled);
}

#[tokio::test]
async fn test_successful_generation_replaces_placeholder() {
    let client = ScriptedClient::new(vec![Ok("\n  1. Cleanse\n2. Serum  \n".to_string())]);
    let controller = controller(client.clone());
    controller.session().with(|session| {
        session.toggle_selection(2);
        session.toggle_selection(1);
        session.take_invalidated();
    });

    let outcome = controller.generate_routine().await;

    assert_eq!(
        outcome,
        RoutineOutcome::Generated("1. Cleanse\n2. Serum".to_string())
    );
    assert_eq!(contents(&controller), vec![GREETING, "1. Cleanse\n2. Serum"]);
    assert!(!has_transient(&controller));

    let mut session = controller.session().lock();
    assert_eq!(session.copy_routine(), Some("1. Cleanse\n2. Serum"));
    let controls = session.controls_view();
    assert!(controls.generate_enabled);
    assert!(controls.copy_enabled);
    assert_eq!(controls.generate_label, "Generate Routine");
    assert_eq!(session.take_invalidated(), vec![View::Chat, View::Controls]);

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0].role, MessageRole::System);
    let user = &calls[0][1].content;
    // selection order is kept in the payload
    let serum = user.find("Revitalift Serum").unwrap();
    let cleanser = user.find("Hydrating Cleanser").unwrap();
    assert!(serum < cleanser);
    assert!(!user.contains("img/"));
}

#[tokio::test]
async fn test_timeout_appends_single_apology_and_reenables_generate() {
    let client = ScriptedClient::new(vec![Err(GenerationError::Timeout(Duration::from_secs(30)))]);
    let controller = controller(client);
    controller.session().with(|session| {
        session.toggle_selection(3);
    });

    let outcome = controller.generate_routine().await;

    assert!(matches!(outcome, RoutineOutcome::Failed(ref err) if err.is_timeout()));
    let transcript = contents(&controller);
    assert_eq!(transcript.last().unwrap(), ROUTINE_APOLOGY);
    assert_eq!(
        transcript.iter().filter(|c| c.as_str() == ROUTINE_APOLOGY).count(),
        1
    );
    assert!(!transcript.iter().any(|c| c == GENERATING_PLACEHOLDER));

    let session = controller.session().lock();
    assert!(session.controls_view().generate_enabled);
    assert_eq!(session.copy_routine(), None);
}

#[tokio::test]
async fn test_remote_and_malformed_failures_use_same_apology() {
    let client = ScriptedClient::new(vec![
        Err(GenerationError::Remote { status: 500 }),
        Err(GenerationError::MalformedResponse),
    ]);
    let controller = controller(client);
    controller.session().with(|session| {
        session.toggle_selection(1);
    });

    controller.generate_routine().await;
    controller.generate_routine().await;

    assert_eq!(
        contents(&controller),
        vec![GREETING, ROUTINE_APOLOGY, ROUTINE_APOLOGY]
    );
}

#[tokio::test]
async fn test_failed_generation_keeps_previous_routine() {
    let client = ScriptedClient::new(vec![
        Ok("First routine".to_string()),
        Err(GenerationError::Remote { status: 503 }),
    ]);
    let controller = controller(client);
    controller.session().with(|session| {
        session.toggle_selection(1);
    });

    controller.generate_routine().await;
    controller.generate_routine().await;

    assert_eq!(
        controller.session().lock().copy_routine(),
        Some("First routine")
    );
}

#[tokio::test]
async fn test_double_trigger_is_rejected_while_in_flight() {
    let (client, mut gates) = GatedClient::new(1);
    let controller = controller(client.clone());
    controller.session().with(|session| {
        session.toggle_selection(1);
    });

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.generate_routine().await })
    };
    client.wait_for_calls(1).await;

    {
        let session = controller.session().lock();
        assert_eq!(session.generation_state(), GenerationState::GeneratingRoutine);
        let controls = session.controls_view();
        assert!(!controls.generate_enabled);
        assert!(controls.busy);
        assert_eq!(controls.generate_label, "Generating…");
    }
    assert_eq!(
        controller.generate_routine().await,
        RoutineOutcome::AlreadyInFlight
    );
    assert_eq!(
        contents(&controller),
        vec![GREETING, GENERATING_PLACEHOLDER]
    );

    gates.remove(0).send(Ok("Routine".to_string())).unwrap();
    assert_eq!(
        first.await.unwrap(),
        RoutineOutcome::Generated("Routine".to_string())
    );
    assert_eq!(client.call_count(), 1);
    assert_eq!(contents(&controller), vec![GREETING, "Routine"]);
}

#[tokio::test]
async fn test_dropped_request_still_restores_idle() {
    let (client, _gates) = GatedClient::new(1);
    let controller = controller(client);
    controller.session().with(|session| {
        session.toggle_selection(2);
    });

    let cancelled =
        tokio::time::timeout(Duration::from_millis(50), controller.generate_routine()).await;

    assert!(cancelled.is_err());
    let session = controller.session().lock();
    assert_eq!(session.generation_state(), GenerationState::Idle);
    assert!(session.controls_view().generate_enabled);
    assert!(!session.transcript().entries().iter().any(|e| e.transient));
}

// ============================================================================
// Free-form chat
// ============================================================================

#[tokio::test]
async fn test_blank_chat_is_ignored() {
    let client = ScriptedClient::new(vec![]);
    let controller = controller(client.clone());

    assert_eq!(controller.submit_chat("   \n").await, ChatOutcome::Ignored);
    assert!(client.calls().is_empty());
    assert_eq!(contents(&controller), vec![GREETING]);
}

#[tokio::test]
async fn test_chat_turn_is_shown_before_reply_arrives() {
    let (client, mut gates) = GatedClient::new(1);
    let controller = controller(client.clone());
    controller.session().with(|session| {
        session.take_invalidated();
    });

    let pending = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit_chat("  Can I use retinol daily?  ").await })
    };
    client.wait_for_calls(1).await;

    {
        let mut session = controller.session().lock();
        let last = session.transcript().last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(last.content, "Can I use retinol daily?");
        assert_eq!(session.take_invalidated(), vec![View::Chat]);
    }

    gates
        .remove(0)
        .send(Ok("  Start twice a week.  ".to_string()))
        .unwrap();
    assert_eq!(
        pending.await.unwrap(),
        ChatOutcome::Replied("Start twice a week.".to_string())
    );
    assert_eq!(
        contents(&controller),
        vec![GREETING, "Can I use retinol daily?", "Start twice a week."]
    );
}

#[tokio::test]
async fn test_chat_failure_appends_apology() {
    let client = ScriptedClient::new(vec![Err(GenerationError::Transport(
        "connection refused".to_string(),
    ))]);
    let controller = controller(client);

    let outcome = controller.submit_chat("hello").await;

    assert!(matches!(outcome, ChatOutcome::Failed(GenerationError::Transport(_))));
    assert_eq!(contents(&controller), vec![GREETING, "hello", CHAT_APOLOGY]);
}

#[tokio::test]
async fn test_chat_sends_only_the_last_twelve_turns() {
    let replies = (0..10).map(|i| Ok(format!("answer {i}"))).collect();
    let client = ScriptedClient::new(replies);
    let controller = controller(client.clone());

    for i in 0..10 {
        controller.submit_chat(&format!("question {i}")).await;
    }

    let calls = client.calls();
    // greeting + q0 on the first call
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[0][0].content, GREETING);

    let last = calls.last().unwrap();
    assert_eq!(last.len(), 12);
    assert_eq!(last.last().unwrap().content, "question 9");
    assert_eq!(last.last().unwrap().role, MessageRole::User);
    assert_eq!(last.first().unwrap().content, "answer 3");

    // the full transcript is still displayed
    assert_eq!(contents(&controller).len(), 21);
}

#[tokio::test]
async fn test_chat_context_excludes_routine_placeholder() {
    let (client, mut gates) = GatedClient::new(2);
    let controller = controller(client.clone());
    controller.session().with(|session| {
        session.toggle_selection(1);
    });

    let routine = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.generate_routine().await })
    };
    client.wait_for_calls(1).await;

    let chat = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit_chat("still there?").await })
    };
    client.wait_for_calls(2).await;

    let chat_context = client.calls.lock().unwrap()[1].clone();
    assert!(
        chat_context
            .iter()
            .all(|message| message.content != GENERATING_PLACEHOLDER)
    );

    gates.remove(0).send(Ok("Routine".to_string())).unwrap();
    gates.remove(0).send(Ok("Yes".to_string())).unwrap();
    routine.await.unwrap();
    chat.await.unwrap();
}

// ============================================================================
// Interleaving
// ============================================================================

#[tokio::test]
async fn test_turns_follow_completion_order() {
    let (client, mut gates) = GatedClient::new(2);
    let controller = controller(client.clone());
    controller.session().with(|session| {
        session.toggle_selection(2);
    });

    let routine = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.generate_routine().await })
    };
    client.wait_for_calls(1).await;

    let chat = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit_chat("Is it fragrance free?").await })
    };
    client.wait_for_calls(2).await;

    let routine_gate = gates.remove(0);
    let chat_gate = gates.remove(0);

    // the chat reply lands first
    chat_gate.send(Ok("Yes, it is.".to_string())).unwrap();
    chat.await.unwrap();
    assert_eq!(
        contents(&controller),
        vec![
            GREETING,
            GENERATING_PLACEHOLDER,
            "Is it fragrance free?",
            "Yes, it is."
        ]
    );

    routine_gate.send(Ok("AM: serum".to_string())).unwrap();
    routine.await.unwrap();

    // placeholder removed by id; the interleaved user turn survives
    assert_eq!(
        contents(&controller),
        vec![GREETING, "Is it fragrance free?", "Yes, it is.", "AM: serum"]
    );
    let session = controller.session().lock();
    assert_eq!(session.generation_state(), GenerationState::Idle);
}
