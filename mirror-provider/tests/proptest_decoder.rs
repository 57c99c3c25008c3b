//! Property-based tests: frame decoding is independent of chunk boundaries.

use mirror_provider::{FrameDecoder, ProviderMode};
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_payloads() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(
        ("\\PC{0,24}", 0u32..1000).prop_map(|(text, n)| json!({ "n": n, "text": text })),
        0..8,
    )
}

/// Render payloads as an SSE body with keep-alives, event lines and CRLFs mixed in.
fn render(payloads: &[Value], done: bool) -> String {
    let mut body = String::new();
    for (i, payload) in payloads.iter().enumerate() {
        match i % 3 {
            0 => body.push_str(": keep-alive\n"),
            1 => body.push_str("event: content_block_delta\n"),
            _ => {}
        }
        let eol = if i % 2 == 0 { "\n" } else { "\r\n" };
        body.push_str(&format!("data: {payload}{eol}{eol}"));
    }
    if done {
        body.push_str("data: [DONE]\n\n");
    }
    body
}

fn decode_in_pieces(bytes: &[u8], cuts: &[usize]) -> Vec<Value> {
    let mut decoder = FrameDecoder::new();
    let mut out = Vec::new();
    let mut start = 0;
    let mut points: Vec<usize> = cuts.iter().map(|c| c % (bytes.len() + 1)).collect();
    points.sort_unstable();
    points.push(bytes.len());
    for end in points {
        if end < start {
            continue;
        }
        out.extend(decoder.push_bytes(&bytes[start..end]));
        start = end;
    }
    out
}

proptest! {
    #[test]
    fn any_fragmentation_yields_same_payloads(
        payloads in arb_payloads(),
        cuts in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        let body = render(&payloads, true);
        let decoded = decode_in_pieces(body.as_bytes(), &cuts);
        prop_assert_eq!(decoded, payloads);
    }

    #[test]
    fn byte_at_a_time_matches_whole(payloads in arb_payloads()) {
        let body = render(&payloads, false);
        let cuts: Vec<usize> = (0..body.len()).collect();
        prop_assert_eq!(decode_in_pieces(body.as_bytes(), &cuts), payloads);
    }

    #[test]
    fn nothing_after_done_is_emitted(
        before in arb_payloads(),
        after in arb_payloads(),
        cuts in prop::collection::vec(any::<usize>(), 0..6),
    ) {
        let mut body = render(&before, true);
        body.push_str(&render(&after, false));
        prop_assert_eq!(decode_in_pieces(body.as_bytes(), &cuts), before);
    }

    #[test]
    fn openai_deltas_concatenate_to_full_text(
        parts in prop::collection::vec("[a-zA-Z ?]{1,12}", 1..10),
        cut in any::<usize>(),
    ) {
        let mut body = String::new();
        for part in &parts {
            let frame = json!({ "choices": [{ "delta": { "content": part } }] });
            body.push_str(&format!("data: {frame}\n\n"));
        }
        body.push_str("data: [DONE]\n\n");

        let mode = ProviderMode::OpenAiCompatible;
        let text: String = decode_in_pieces(body.as_bytes(), &[cut])
            .iter()
            .filter_map(|p| mode.extract_delta(p).map(str::to_owned))
            .collect();
        prop_assert_eq!(text, parts.concat());
    }
}

#[test]
fn split_json_inside_one_line_is_completed_by_next_chunk() {
    let mut decoder = FrameDecoder::new();
    assert_eq!(decoder.push("data: {\"choices\":[{\"del").count(), 0);
    let frames: Vec<Value> = decoder.push("ta\":{\"content\":\"Hi\"}}]}\n\n").collect();
    assert_eq!(
        ProviderMode::OpenAiCompatible.extract_delta(&frames[0]),
        Some("Hi")
    );
}
