//! One conversation turn wired end to end.
//!
//! [`run_turn`] moves the [`Conversation`] into streaming, runs the request,
//! and keeps the transcript in step with what the sink sees: fragments go to
//! the pending reply, completion appends it, failure discards it.

use mirror_prompt::PersonaId;
use mirror_types::{ChatError, Conversation, ConversationError};

use crate::client::MirrorClient;
use crate::streaming::ChatSink;

/// Run one turn for `text` against `conversation`.
///
/// Returns `Err` only when the conversation refuses the turn (empty text,
/// paused, another turn in flight); provider failures go to
/// [`ChatSink::on_error`] and leave the conversation ready for the next turn.
pub async fn run_turn<S: ChatSink>(
    client: &MirrorClient,
    persona: PersonaId,
    conversation: &mut Conversation,
    text: &str,
    sink: S,
) -> Result<(), ConversationError> {
    let request = conversation.begin_turn(text)?;
    let relay = TurnRelay { conversation, sink };
    client
        .stream_chat(persona, &request.messages, request.flags, relay)
        .await;
    Ok(())
}

struct TurnRelay<'a, S> {
    conversation: &'a mut Conversation,
    sink: S,
}

impl<S: ChatSink> ChatSink for TurnRelay<'_, S> {
    fn on_delta(&mut self, text: &str) {
        if self.conversation.push_delta(text).is_ok() {
            self.sink.on_delta(text);
        }
    }

    fn on_done(&mut self) {
        if self.conversation.finish_turn().is_ok() {
            self.sink.on_done();
        }
    }

    fn on_error(&mut self, error: ChatError) {
        if self.conversation.fail_turn().is_ok() {
            self.sink.on_error(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ProviderMode;
    use crate::streaming::{DeltaStream, drive_sink};
    use bytes::Bytes;
    use futures::stream;
    use mirror_types::{Message, Phase, Role};

    struct Silent;

    impl ChatSink for Silent {
        fn on_delta(&mut self, _: &str) {}
        fn on_done(&mut self) {}
        fn on_error(&mut self, _: ChatError) {}
    }

    #[derive(Default)]
    struct Recorder {
        deltas: Vec<String>,
        done: usize,
        errors: Vec<ChatError>,
    }

    impl ChatSink for Recorder {
        fn on_delta(&mut self, text: &str) {
            self.deltas.push(text.to_owned());
        }
        fn on_done(&mut self) {
            self.done += 1;
        }
        fn on_error(&mut self, error: ChatError) {
            self.errors.push(error);
        }
    }

    #[tokio::test]
    async fn interrupted_stream_discards_partial_reply() {
        let mut conversation = Conversation::new();
        conversation.begin_turn("Type: memoir").unwrap();

        let body = stream::iter(vec![
            Ok(Bytes::from_static(b"data: {\"choices\":[{\"delta\":{\"content\":\"What \"}}]}\n\n")),
            Ok(Bytes::from_static(b"data: {\"choices\":[{\"delta\":{\"content\":\"happened\"}}]}\n\n")),
            Err(std::io::Error::other("connection reset")),
        ]);
        let deltas = DeltaStream::from_byte_stream(ProviderMode::OpenAiCompatible, body);

        let mut recorder = Recorder::default();
        let relay = TurnRelay {
            conversation: &mut conversation,
            sink: &mut recorder,
        };
        drive_sink(PersonaId::Sage, deltas, relay).await;

        assert_eq!(recorder.deltas, vec!["What ", "happened"]);
        assert_eq!(recorder.done, 0);
        assert_eq!(recorder.errors.len(), 1);
        assert!(matches!(&recorder.errors[0], ChatError::Unknown(msg) if msg.contains("connection reset")));
        assert_eq!(conversation.phase(), Phase::Ready);
        assert_eq!(conversation.pending_reply(), "");
        assert_eq!(conversation.messages(), &[Message::user("Type: memoir")]);
    }

    #[tokio::test]
    async fn completed_stream_appends_reply() {
        let mut conversation = Conversation::new();
        conversation.begin_turn("Type: memoir").unwrap();

        let body = stream::iter(vec![
            Ok::<_, std::io::Error>(Bytes::from_static(
                b"data: {\"choices\":[{\"delta\":{\"content\":\"Why now?\"}}]}\n\ndata: [DONE]\n\n",
            )),
        ]);
        let deltas = DeltaStream::from_byte_stream(ProviderMode::OpenAiCompatible, body);

        let mut recorder = Recorder::default();
        let relay = TurnRelay {
            conversation: &mut conversation,
            sink: &mut recorder,
        };
        drive_sink(PersonaId::Sage, deltas, relay).await;

        assert_eq!(recorder.done, 1);
        assert!(recorder.errors.is_empty());
        let messages = conversation.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "Why now?");
    }

    #[tokio::test]
    async fn missing_credential_fails_turn_but_keeps_user_message() {
        let client = MirrorClient::from_config(crate::ClientConfig::default());
        let mut conversation = Conversation::new();
        run_turn(&client, PersonaId::Sage, &mut conversation, "Type: essay", Silent)
            .await
            .unwrap();
        assert_eq!(conversation.phase(), Phase::Ready);
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::User);
    }

    #[tokio::test]
    async fn paused_conversation_refuses_turn() {
        let client = MirrorClient::new("sk-ant-test");
        let mut conversation = Conversation::new();
        conversation.pause().unwrap();
        let err = run_turn(&client, PersonaId::Sage, &mut conversation, "hi", Silent)
            .await
            .unwrap_err();
        assert_eq!(err, ConversationError::Paused);
        assert!(conversation.messages().is_empty());
    }
}
