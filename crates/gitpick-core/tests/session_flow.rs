use std::collections::VecDeque;

use gitpick_core::{
    CheckoutSink, InputEvent, Outcome, Paint, PaintStyle, PickError, Resolver, Result, Screen,
    Session, Smartlog, Viewport,
};

#[derive(Default)]
struct ScriptedScreen {
    events: VecDeque<InputEvent>,
    frames: Vec<Vec<Paint>>,
    pending: Vec<Paint>,
}

impl ScriptedScreen {
    fn new(events: &[InputEvent]) -> Self {
        Self {
            events: events.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn selected_rows(&self) -> Vec<u16> {
        self.frames
            .iter()
            .map(|frame| {
                frame
                    .iter()
                    .find(|p| p.style == PaintStyle::Selected)
                    .map(|p| p.row)
                    .expect("every frame highlights a row")
            })
            .collect()
    }
}

impl Screen for ScriptedScreen {
    fn size(&mut self) -> Result<Viewport> {
        Ok(Viewport::new(80, 24))
    }

    fn clear(&mut self) -> Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn paint(&mut self, paint: &Paint) -> Result<()> {
        self.pending.push(paint.clone());
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }

    fn next_event(&mut self) -> Result<InputEvent> {
        Ok(self.events.pop_front().unwrap_or(InputEvent::Interrupt))
    }
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<String>,
    fail: bool,
}

impl CheckoutSink for RecordingSink {
    fn checkout(&mut self, reference: &str) -> Result<()> {
        self.calls.push(reference.to_string());
        if self.fail {
            return Err(PickError::CheckoutFailed {
                reference: reference.to_string(),
                exit_code: Some(1),
                stderr: "error: pathspec did not match".to_string(),
            });
        }
        Ok(())
    }
}

const FIXTURE: [&str; 2] = [
    "o  a1b2c3d  alice  (origin/main, main)  2 hours ago",
    "* e4f5a6b  bob  3 hours ago",
];

fn run(
    lines: &[&str],
    events: &[InputEvent],
    sink: &mut RecordingSink,
) -> (Result<Outcome>, ScriptedScreen) {
    let log = Smartlog::from_lines(lines.iter().copied()).expect("valid log");
    let mut screen = ScriptedScreen::new(events);
    let outcome = Session::new(&log, Resolver::default())
        .expect("session")
        .run(&mut screen, sink);
    (outcome, screen)
}

#[test]
fn up_then_confirm_checks_out_local_branch() {
    let mut sink = RecordingSink::default();
    let (outcome, _) = run(&FIXTURE, &[InputEvent::Up, InputEvent::Confirm], &mut sink);
    assert_eq!(outcome.expect("outcome"), Outcome::CheckedOut("main".to_string()));
    assert_eq!(sink.calls, vec!["main".to_string()]);
}

#[test]
fn confirming_current_checkout_is_a_no_op() {
    let mut sink = RecordingSink::default();
    let (outcome, _) = run(&FIXTURE, &[InputEvent::Confirm], &mut sink);
    assert_eq!(outcome.expect("outcome"), Outcome::Unchanged("e4f5a6b".to_string()));
    assert!(sink.calls.is_empty());
}

#[test]
fn wandering_back_to_start_does_not_checkout() {
    let mut sink = RecordingSink::default();
    let events = [
        InputEvent::Up,
        InputEvent::Up,
        InputEvent::Down,
        InputEvent::Down,
        InputEvent::Confirm,
    ];
    let (outcome, _) = run(&FIXTURE, &events, &mut sink);
    assert!(matches!(outcome.expect("outcome"), Outcome::Unchanged(_)));
    assert!(sink.calls.is_empty());
}

#[test]
fn cancel_and_interrupt_end_without_checkout() {
    let mut sink = RecordingSink::default();
    let (outcome, _) = run(&FIXTURE, &[InputEvent::Up, InputEvent::Cancel], &mut sink);
    assert_eq!(outcome.expect("outcome"), Outcome::Cancelled);

    let (outcome, _) = run(&FIXTURE, &[InputEvent::Up, InputEvent::Interrupt], &mut sink);
    assert_eq!(outcome.expect("outcome"), Outcome::Interrupted);
    assert!(sink.calls.is_empty());
}

#[test]
fn every_move_repaints_selected_row_in_screen_coordinates() {
    let lines = [
        "o  aaa1111  alice  (feature)  1 day ago",
        "|",
        "o  bbb2222  bob  2 days ago",
        ":",
        "*  ccc3333  carol  (main)  3 days ago",
    ];
    let mut sink = RecordingSink::default();
    let events = [
        InputEvent::Up,
        InputEvent::Up,
        InputEvent::Up,
        InputEvent::Resize,
        InputEvent::Bottom,
        InputEvent::Cancel,
    ];
    let (outcome, screen) = run(&lines, &events, &mut sink);
    assert_eq!(outcome.expect("outcome"), Outcome::Cancelled);
    // initial, three moves (the last one clamped), resize, bottom
    assert_eq!(screen.selected_rows(), vec![5, 3, 1, 1, 1, 5]);
}

#[test]
fn malformed_row_is_selectable_but_unresolvable() {
    let lines = ["o", "|", "*  ccc3333  carol  3 days ago"];
    let mut sink = RecordingSink::default();
    let (outcome, screen) = run(&lines, &[InputEvent::Up, InputEvent::Confirm], &mut sink);
    assert!(matches!(
        outcome,
        Err(PickError::UnresolvableReference { .. })
    ));
    assert!(sink.calls.is_empty());
    assert_eq!(screen.selected_rows(), vec![3, 1]);
}

#[test]
fn row_without_branches_checks_out_commit_id() {
    let lines = ["o  0ddba11  dana  4 days ago", "*  ccc3333  carol  (main)"];
    let mut sink = RecordingSink::default();
    let (outcome, _) = run(&lines, &[InputEvent::Top, InputEvent::Confirm], &mut sink);
    assert_eq!(outcome.expect("outcome"), Outcome::CheckedOut("0ddba11".to_string()));
    assert_eq!(sink.calls, vec!["0ddba11".to_string()]);
}

#[test]
fn checkout_failure_is_surfaced() {
    let mut sink = RecordingSink {
        fail: true,
        ..RecordingSink::default()
    };
    let (outcome, _) = run(&FIXTURE, &[InputEvent::Up, InputEvent::Confirm], &mut sink);
    match outcome {
        Err(PickError::CheckoutFailed { reference, stderr, .. }) => {
            assert_eq!(reference, "main");
            assert!(stderr.contains("pathspec"));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(sink.calls.len(), 1);
}
