use super::*;
use crate::{encoding::descriptor::AudioDescriptor, test_support::clip};

fn descriptor() -> EncodingDescriptor {
    EncodingDescriptor {
        width: 1920,
        height: 1080,
        pix_fmt: "yuv420p".to_string(),
        color_space: Some("bt709".to_string()),
        color_transfer: None,
        color_primaries: Some("bt709".to_string()),
        audio: Some(AudioDescriptor {
            sample_rate: 48_000,
            channels: 2,
            channel_layout: "stereo".to_string(),
        }),
    }
}

fn clips() -> Vec<Clip> {
    let mut rotated = clip("2", "b.mp4", 1.0, 2.5);
    rotated.rotation_override = Some(Rotation::Neg90);
    vec![clip("1", "a.mp4", 0.0, 4.0), rotated]
}

#[test]
fn request_uses_server_wire_layout() {
    let req = RenderRequest::new(&clips(), &descriptor(), "video-sort-trip");
    let json: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();

    assert_eq!(json["name"], "video-sort-trip");
    assert_eq!(json["clips"][0]["thumbnail_name"], "a.mp4");
    assert!(json["clips"][0]["override_rotation"].is_null());
    assert_eq!(json["clips"][1]["override_rotation"], "Neg90");
    assert_eq!(json["clips"][1]["start"], 1.0);
    assert_eq!(json["clips"][1]["end"], 2.5);

    let enc = &json["encoding"];
    assert_eq!(enc["width"], 1920);
    assert_eq!(enc["rotation"], "Unrotated");
    assert_eq!(enc["duration"], 0.0);
    assert_eq!(enc["bit_rate"], 0);
    assert!(enc["color_transfer"].is_null());
    assert_eq!(enc["audio"]["channel_layout"], "stereo");
    assert_eq!(enc["audio"]["bit_rate"], 0);
    assert_eq!(req.artifact_name(), "video-sort-trip.mp4");
}

#[test]
fn request_without_audio_sends_null() {
    let mut d = descriptor();
    d.audio = None;
    let req = RenderRequest::new(&clips(), &d, "x");
    let json: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
    assert!(json["encoding"]["audio"].is_null());
}

#[test]
fn scripted_client_replays_progress_then_done() {
    let client = ScriptedRenderClient::succeeding(["frame=1", "frame=2"]);
    let req = RenderRequest::new(&clips(), &descriptor(), "out");
    let job = client.submit(&req).unwrap();

    assert_eq!(job.name(), "out");
    assert_eq!(job.next_blocking(), RenderEvent::Progress("frame=1".to_string()));
    assert_eq!(job.try_next(), Some(RenderEvent::Progress("frame=2".to_string())));
    assert_eq!(
        job.next_blocking(),
        RenderEvent::Done {
            artifact: "out.mp4".to_string()
        }
    );
    assert!(matches!(job.try_next(), Some(RenderEvent::Failed(_))));
    assert_eq!(client.submissions().len(), 1);
}

#[test]
fn rejecting_client_returns_render_error() {
    let client = ScriptedRenderClient::rejecting("HTTP 500 error: boom");
    let req = RenderRequest::new(&clips(), &descriptor(), "out");
    let err = client.submit(&req).err().unwrap();
    assert!(matches!(err, ClipError::Render(_)));
    assert!(err.to_string().contains("HTTP 500 error: boom"));
}

#[test]
fn empty_channel_reports_nothing_yet() {
    let (tx, job) = RenderJob::channel("pending");
    assert_eq!(job.try_next(), None);
    tx.send(RenderEvent::Progress("x".to_string())).unwrap();
    assert_eq!(job.try_next(), Some(RenderEvent::Progress("x".to_string())));
}
