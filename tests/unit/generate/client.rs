use std::cell::RefCell;
use std::collections::VecDeque;

use super::*;

struct Scripted {
    outcomes: RefCell<VecDeque<SpriteResult<SourceImage>>>,
    calls: RefCell<u32>,
}

impl Scripted {
    fn new(outcomes: Vec<SpriteResult<SourceImage>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            calls: RefCell::new(0),
        }
    }

    fn calls(&self) -> u32 {
        *self.calls.borrow()
    }
}

impl ImageGenerator for Scripted {
    fn generate(&self, _request: &GenerationRequest) -> SpriteResult<SourceImage> {
        *self.calls.borrow_mut() += 1;
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(SpriteError::service("script exhausted")))
    }
}

#[derive(Default)]
struct RecordingSleeper(RefCell<Vec<Duration>>);

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.0.borrow_mut().push(duration);
    }
}

fn image() -> SourceImage {
    SourceImage::from_rgba8(1, 1, vec![1, 2, 3, 255]).unwrap()
}

fn request() -> GenerationRequest {
    GenerationRequest::new("a walking cat, 4x4 sprite sheet")
}

#[test]
fn succeeds_after_transient_failures_with_doubling_backoff() {
    let generator = Scripted::new(vec![
        Err(SpriteError::transient("overloaded")),
        Err(SpriteError::transient("internal")),
        Ok(image()),
    ]);
    let sleeper = RecordingSleeper::default();
    let img =
        generate_with_retry(&generator, &request(), RetryPolicy::default(), &sleeper).unwrap();
    assert_eq!(img, image());
    assert_eq!(generator.calls(), 3);
    assert_eq!(
        *sleeper.0.borrow(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[test]
fn gives_up_after_three_attempts() {
    let generator = Scripted::new(vec![
        Err(SpriteError::transient("overloaded")),
        Err(SpriteError::transient("overloaded")),
        Err(SpriteError::transient("still overloaded")),
        Ok(image()),
    ]);
    let sleeper = RecordingSleeper::default();
    let err = generate_with_retry(&generator, &request(), RetryPolicy::default(), &sleeper)
        .unwrap_err();
    assert!(err.to_string().contains("still overloaded"));
    assert_eq!(generator.calls(), 3);
    assert_eq!(sleeper.0.borrow().len(), 2);
}

#[test]
fn permanent_errors_are_not_retried() {
    let generator = Scripted::new(vec![Err(SpriteError::service("prompt rejected"))]);
    let sleeper = RecordingSleeper::default();
    let err = generate_with_retry(&generator, &request(), RetryPolicy::default(), &sleeper)
        .unwrap_err();
    assert!(!err.is_transient());
    assert_eq!(generator.calls(), 1);
    assert!(sleeper.0.borrow().is_empty());
}

#[test]
fn empty_instruction_never_reaches_the_service() {
    let generator = Scripted::new(vec![Ok(image())]);
    let err = generate_with_retry(
        &generator,
        &GenerationRequest::new("   "),
        RetryPolicy::default(),
        &RecordingSleeper::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SpriteError::Validation(_)));
    assert_eq!(generator.calls(), 0);
}

#[test]
fn aspect_ratio_parsing() {
    assert_eq!(
        AspectRatio::parse("16:9").unwrap(),
        AspectRatio {
            width: 16,
            height: 9
        }
    );
    assert!(AspectRatio::parse("16x9").is_err());
    assert!(AspectRatio::parse("0:1").is_err());
    let a: AspectRatio = serde_json::from_str("\"3:4\"").unwrap();
    assert_eq!(String::from(a), "3:4");
    assert_eq!(
        serde_json::to_string(&SizeClass::Large).unwrap(),
        "\"large\""
    );
}
