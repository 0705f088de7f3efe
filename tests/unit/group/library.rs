use std::time::Duration;

use super::*;
use crate::encode::codec::InMemoryCodec;
use crate::encode::gif::GifCodec;

fn sheet() -> SourceImage {
    let px: Vec<u8> = (0..16u8).flat_map(|i| [i * 15, 40, 80, 255]).collect();
    SourceImage::from_rgba8(4, 4, px).unwrap()
}

struct Fixed(SpriteResult<()>);

impl ImageGenerator for Fixed {
    fn generate(&self, _request: &GenerationRequest) -> SpriteResult<SourceImage> {
        match &self.0 {
            Ok(()) => Ok(sheet()),
            Err(e) => Err(SpriteError::service(e.to_string())),
        }
    }
}

struct NoSleep;

impl Sleeper for NoSleep {
    fn sleep(&self, _duration: Duration) {}
}

#[test]
fn groups_get_sequential_ids_in_creation_order() {
    let mut lib = GroupLibrary::new();
    let a = lib.create_group(sheet());
    let b = lib.create_group(sheet());
    assert_eq!((a, b), (GroupId(0), GroupId(1)));
    let ids: Vec<_> = lib.groups().iter().map(Group::id).collect();
    assert_eq!(ids, vec![a, b]);
    assert!(lib.get(GroupId(9)).is_err());
}

#[test]
fn groups_do_not_share_overlays() {
    let mut lib = GroupLibrary::new();
    let a = lib.create_group(sheet());
    let b = lib.create_group(sheet());
    lib.get_mut(a).unwrap().toggle_exclusion(0);
    assert!(lib.get(a).unwrap().edits().is_excluded(0));
    assert!(!lib.get(b).unwrap().edits().is_excluded(0));
}

#[test]
fn export_records_assets_and_completes_state() {
    let mut lib = GroupLibrary::new();
    let id = lib.create_group(sheet());
    let mut state = ProcessingState::new();

    let anim = lib
        .export_animation(id, &mut GifCodec::new(), &mut state)
        .unwrap();
    assert_eq!(state.phase(), Phase::Completed);
    let asset = lib.asset(anim).unwrap();
    assert_eq!(asset.kind, AssetKind::AnimatedOutput);
    assert_eq!(asset.name, "group-0-animation.gif");
    assert_eq!((asset.width, asset.height), (1, 1));
    assert_eq!(&asset.bytes[..6], b"GIF89a");

    let sheet_id = lib.export_sheet(id, &mut state).unwrap();
    assert_eq!(lib.asset(sheet_id).unwrap().kind, AssetKind::RasterSheet);
    assert_eq!(lib.assets_for(id).count(), 2);
}

#[test]
fn failed_export_leaves_state_idle_with_error_and_records_nothing() {
    let mut lib = GroupLibrary::new();
    let id = lib.create_group(sheet());
    lib.get_mut(id).unwrap().set_total_frames(0).unwrap();
    let mut state = ProcessingState::new();

    let err = lib
        .export_animation(id, &mut InMemoryCodec::new(), &mut state)
        .unwrap_err();
    assert!(matches!(err, SpriteError::NoFrames));
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.error().is_some());
    assert!(lib.assets().is_empty());
}

#[test]
fn deleting_a_group_evicts_its_assets() {
    let mut lib = GroupLibrary::new();
    let a = lib.create_group(sheet());
    let b = lib.create_group(sheet());
    let mut state = ProcessingState::new();
    lib.export_sheet(a, &mut state).unwrap();
    let kept = lib.export_sheet(b, &mut state).unwrap();

    let removed = lib.remove_group(a).unwrap();
    assert_eq!(removed.id(), a);
    assert_eq!(lib.assets().len(), 1);
    assert_eq!(lib.assets()[0].id, kept);
    assert!(lib.remove_group(a).is_err());
}

#[test]
fn export_all_processes_groups_in_creation_order() {
    let mut lib = GroupLibrary::new();
    let a = lib.create_group(sheet());
    let b = lib.create_group(sheet());
    let c = lib.create_group(sheet());
    lib.get_mut(b).unwrap().set_total_frames(0).unwrap();

    let mut finished = Vec::new();
    let results = lib.export_all(
        &mut || -> Box<dyn AnimationCodec> { Box::new(InMemoryCodec::new()) },
        &mut |id, p| {
            if p == 100 && finished.last() != Some(&id) {
                finished.push(id);
            }
        },
    );

    assert_eq!(finished, vec![a, c]);
    assert_eq!(results.len(), 3);
    assert!(results[0].1.is_ok());
    assert!(matches!(results[1].1, Err(SpriteError::NoFrames)));
    assert!(results[2].1.is_ok());
    assert_eq!(lib.assets().len(), 2);
}

#[test]
fn generated_images_become_groups() {
    let mut lib = GroupLibrary::new();
    let mut state = ProcessingState::new();
    let id = lib
        .generate_group(
            &Fixed(Ok(())),
            &GenerationRequest::new("walk cycle"),
            RetryPolicy::default(),
            &NoSleep,
            &mut state,
        )
        .unwrap();
    assert_eq!(lib.get(id).unwrap().source().width(), 4);
    assert_eq!(state.phase(), Phase::Completed);

    let err = lib
        .generate_group(
            &Fixed(Err(SpriteError::service("quota"))),
            &GenerationRequest::new("walk cycle"),
            RetryPolicy::default(),
            &NoSleep,
            &mut state,
        )
        .unwrap_err();
    assert!(err.to_string().contains("quota"));
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(lib.groups().len(), 1);
}
