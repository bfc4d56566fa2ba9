use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Notify;

use super::Outcome;
use super::RequestDispatcher;
use crate::domain::models::AssistantReply;
use crate::domain::models::BackendBox;
use crate::domain::models::RequestType;
use crate::domain::models::Sender;
use crate::domain::models::SubmitError;
use crate::domain::models::SubmitOptions;
use crate::domain::models::TranslationDirection;
use crate::domain::models::FAILURE_TEXT;
use crate::domain::services::testing::FakeBackend;
use crate::domain::services::ConversationStore;
use crate::infrastructure::backends::curio::Curio;

fn setup(fake: FakeBackend) -> Result<(Arc<FakeBackend>, Arc<ConversationStore>, RequestDispatcher)> {
    let (fake, backend) = fake.boxed();
    let conversation = Arc::new(ConversationStore::with_greeting("Hi there!")?);
    let dispatcher = RequestDispatcher::new(backend, conversation.clone(), 1);
    return Ok((fake, conversation, dispatcher));
}

fn transcript(conversation: &ConversationStore) -> Vec<(Sender, String)> {
    return conversation
        .all()
        .into_iter()
        .map(|msg| return (msg.sender, msg.text))
        .collect();
}

#[tokio::test]
async fn it_appends_the_question_and_answer() -> Result<()> {
    let (fake, conversation, dispatcher) =
        setup(FakeBackend::replying("Photosynthesis is how plants make food."))?;

    let outcome = dispatcher
        .submit("What is photosynthesis?", None, SubmitOptions::default())
        .await?;

    assert!(matches!(outcome, Outcome::Answered(_)));
    assert_eq!(
        transcript(&conversation),
        vec![
            (Sender::Assistant, "Hi there!".to_string()),
            (Sender::User, "What is photosynthesis?".to_string()),
            (
                Sender::Assistant,
                "Photosynthesis is how plants make food.".to_string()
            ),
        ]
    );
    assert_eq!(outcome.message(), &conversation.last().unwrap());
    assert!(!dispatcher.is_busy());

    let sent = fake.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_id, 1);
    assert_eq!(sent[0].message, "What is photosynthesis?");
    assert_eq!(sent[0].request_type, None);

    return Ok(());
}

#[tokio::test]
async fn it_apologizes_on_failure() -> Result<()> {
    let (_fake, conversation, dispatcher) = setup(FakeBackend::failing(500))?;

    let outcome = dispatcher
        .submit("What is photosynthesis?", None, SubmitOptions::default())
        .await?;

    assert!(matches!(outcome, Outcome::Apologized(_)));
    assert_eq!(
        transcript(&conversation),
        vec![
            (Sender::Assistant, "Hi there!".to_string()),
            (Sender::User, "What is photosynthesis?".to_string()),
            (Sender::Assistant, FAILURE_TEXT.to_string()),
        ]
    );
    assert!(conversation.last().unwrap().is_failure());
    assert!(!dispatcher.is_busy());

    return Ok(());
}

#[tokio::test]
async fn it_rejects_blank_input() -> Result<()> {
    let (fake, conversation, dispatcher) = setup(FakeBackend::default())?;

    for text in ["", "   ", "\n\t "] {
        let res = dispatcher.submit(text, None, SubmitOptions::default()).await;
        assert_eq!(res, Err(SubmitError::Validation));
    }

    assert_eq!(conversation.len(), 1);
    assert!(fake.sent().is_empty());
    assert!(!dispatcher.is_busy());

    return Ok(());
}

#[tokio::test]
async fn it_echoes_raw_text_and_sends_trimmed_text() -> Result<()> {
    let (fake, conversation, dispatcher) = setup(FakeBackend::default())?;

    dispatcher
        .submit("  Why is the sky blue?  ", None, SubmitOptions::default())
        .await?;

    assert_eq!(conversation.all()[1].text, "  Why is the sky blue?  ");
    assert_eq!(fake.sent()[0].message, "Why is the sky blue?");

    return Ok(());
}

#[tokio::test]
async fn it_rejects_while_in_flight() -> Result<()> {
    let gate = Arc::new(Notify::new());
    let (fake, conversation, dispatcher) =
        setup(FakeBackend::replying("First answer").gated(gate.clone()))?;
    let mut indicator = dispatcher.indicator();

    let first = dispatcher.submit("first", None, SubmitOptions::default());
    let second = async {
        while !dispatcher.is_busy() {
            tokio::task::yield_now().await;
        }
        assert!(indicator.is_visible());

        let res = dispatcher
            .submit("second", None, SubmitOptions::default())
            .await;
        assert_eq!(conversation.len(), 2);

        gate.notify_one();
        return res;
    };

    let (first, second) = tokio::join!(first, second);

    assert!(matches!(first?, Outcome::Answered(_)));
    assert_eq!(second, Err(SubmitError::Busy));
    assert_eq!(fake.sent().len(), 1);
    assert_eq!(
        transcript(&conversation),
        vec![
            (Sender::Assistant, "Hi there!".to_string()),
            (Sender::User, "first".to_string()),
            (Sender::Assistant, "First answer".to_string()),
        ]
    );
    assert!(!dispatcher.is_busy());
    assert!(!indicator.changed().await?);

    return Ok(());
}

#[tokio::test]
async fn it_keeps_alternating_turns() -> Result<()> {
    let (_fake, conversation, dispatcher) = setup(FakeBackend::default())?;

    for text in ["one", "two", "three"] {
        dispatcher.submit(text, None, SubmitOptions::default()).await?;
    }

    let senders = conversation
        .all()
        .iter()
        .skip(1)
        .map(|msg| return msg.sender)
        .collect::<Vec<_>>();
    assert_eq!(
        senders,
        vec![
            Sender::User,
            Sender::Assistant,
            Sender::User,
            Sender::Assistant,
            Sender::User,
            Sender::Assistant,
        ]
    );

    return Ok(());
}

#[tokio::test]
async fn it_forwards_classification_and_options() -> Result<()> {
    let (fake, _conversation, dispatcher) = setup(FakeBackend::default())?;

    dispatcher
        .submit(
            "Water is wet",
            Some(RequestType::Translate),
            SubmitOptions {
                translation_direction: Some(TranslationDirection::EnglishToBengali),
                translate_reply: true,
            },
        )
        .await?;

    let sent = fake.sent();
    assert_eq!(sent[0].request_type, Some(RequestType::Translate));
    assert_eq!(
        sent[0].options.as_ref().unwrap().translation_direction,
        Some(TranslationDirection::EnglishToBengali)
    );
    assert!(sent[0].translate_reply);

    return Ok(());
}

#[tokio::test]
async fn it_keeps_reply_translations() -> Result<()> {
    let fake = FakeBackend {
        reply: Ok(AssistantReply {
            response: "Water is wet.".to_string(),
            bengali_translation: Some("পানি ভেজা।".to_string()),
        }),
        ..FakeBackend::default()
    };
    let (_fake, conversation, dispatcher) = setup(fake)?;

    dispatcher
        .submit("Is water wet?", None, SubmitOptions::default())
        .await?;

    let reply = conversation.last().unwrap();
    assert_eq!(reply.text, "Water is wet.");
    assert_eq!(reply.translation, Some("পানি ভেজা।".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_keeps_tabs_in_the_echo() -> Result<()> {
    let (fake, conversation, dispatcher) = setup(FakeBackend::replying("a\tb"))?;

    dispatcher.submit("x\ty", None, SubmitOptions::default()).await?;

    let all = conversation.all();
    assert_eq!(all[1].text, "x\ty");
    assert_eq!(all[2].text, "a\tb");
    assert_eq!(fake.sent()[0].message, "x\ty");

    return Ok(());
}

#[tokio::test]
async fn it_apologizes_when_the_request_times_out() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let backend: BackendBox = Arc::new(Curio::new(
        format!("http://{}", listener.local_addr()?),
        200,
        200,
    ));
    let conversation = Arc::new(ConversationStore::with_greeting("Hi there!")?);
    let dispatcher = RequestDispatcher::new(backend, conversation.clone(), 1);

    let outcome = dispatcher
        .submit("What is photosynthesis?", None, SubmitOptions::default())
        .await?;

    assert!(matches!(outcome, Outcome::Apologized(_)));
    assert_eq!(
        transcript(&conversation),
        vec![
            (Sender::Assistant, "Hi there!".to_string()),
            (Sender::User, "What is photosynthesis?".to_string()),
            (Sender::Assistant, FAILURE_TEXT.to_string()),
        ]
    );
    assert!(!dispatcher.is_busy());

    return Ok(());
}
