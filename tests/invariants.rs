//! Property tests: random sequences of joins, departures and results never
//! break the session invariants.

use court_rotation_web::{
    add_player, auto_fill_empty_courts, pick_four, remove_player, start_session, submit_score,
    RotationPolicy, SelectionStrategy, Session, SessionError, SessionSettings, SkillTier,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Join(SkillTier),
    Leave(usize),
    Finish { court: usize, a: u32, b: u32 },
}

fn tier() -> impl Strategy<Value = SkillTier> {
    prop_oneof![
        Just(SkillTier::Beginner),
        Just(SkillTier::Novice),
        Just(SkillTier::Intermediate),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => tier().prop_map(Op::Join),
        1 => any::<usize>().prop_map(Op::Leave),
        3 => (any::<usize>(), 0u32..12, 0u32..12).prop_map(|(court, a, b)| Op::Finish { court, a, b }),
    ]
}

fn settings() -> impl Strategy<Value = SessionSettings> {
    (
        1u32..=3,
        prop_oneof![
            Just(SelectionStrategy::SlidingWindow),
            Just(SelectionStrategy::Exhaustive)
        ],
        prop_oneof![
            Just(RotationPolicy::FifoPreserving),
            Just(RotationPolicy::WinnersFirst),
            Just(RotationPolicy::WinnersStay)
        ],
    )
        .prop_map(|(court_count, selection, rotation)| SessionSettings {
            court_count,
            selection,
            rotation,
            ..SessionSettings::default()
        })
}

fn apply(s: &mut Session, op: &Op, next_id: &mut usize) -> Result<isize, SessionError> {
    match *op {
        Op::Join(skill) => {
            *next_id += 1;
            add_player(s, &format!("Player {next_id}"), skill, None).map(|_| 1)
        }
        Op::Leave(pick) => {
            let names: Vec<String> = s.all_players().iter().map(|p| p.name.clone()).collect();
            if names.is_empty() {
                return Ok(0);
            }
            remove_player(s, &names[pick % names.len()]).map(|_| -1)
        }
        Op::Finish { court, a, b } => {
            let in_play: Vec<u32> = s.courts_in_play().map(|c| c.id).collect();
            if in_play.is_empty() {
                return Ok(0);
            }
            submit_score(s, in_play[court % in_play.len()], a, b).map(|_| 0)
        }
    }
}

proptest! {
    #[test]
    fn operations_keep_the_session_consistent(
        settings in settings(),
        opening in prop::collection::vec(tier(), 0..10),
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut s = Session::new(settings);
        let mut next_id = 0;
        let mut expected: isize = 0;
        for skill in opening {
            if let Ok(delta) = apply(&mut s, &Op::Join(skill), &mut next_id) {
                expected += delta;
            }
        }
        start_session(&mut s).unwrap();

        for op in &ops {
            match apply(&mut s, op, &mut next_id) {
                Ok(delta) => expected += delta,
                Err(SessionError::SessionFull { .. }) | Err(SessionError::DrawNotAllowed) => {}
                Err(e) => prop_assert!(false, "{:?} failed: {}", op, e),
            }

            prop_assert!(s.check_invariants().is_ok());
            prop_assert_eq!(s.player_count() as isize, expected);
            prop_assert!(s.player_count() <= s.player_capacity());
            for court in s.courts_in_play() {
                prop_assert_eq!(court.players().len(), 4);
            }
            if s.courts.iter().any(|c| c.is_empty()) {
                let mut line = s.line.clone();
                prop_assert!(pick_four(&mut line, s.settings.selection).is_none());
            }
            prop_assert!(auto_fill_empty_courts(&mut s).unwrap().is_empty());
        }
    }
}
