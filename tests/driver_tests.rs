use duel_engine::{load_encounter, load_snapshot, run, CliOptions};
use std::path::PathBuf;

fn demo_encounter() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("encounter.json")
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("duel-engine-{}-{name}", std::process::id()))
}

#[test]
fn demo_encounter_loads_and_validates() {
    let encounter = load_encounter(&demo_encounter()).expect("demo encounter is valid");
    assert_eq!(encounter.combatant_one.name, "Cinderpup");
    assert_eq!(encounter.combatant_two.moves.len(), 2);
}

#[test]
fn missing_encounter_file_reports_path() {
    let err = load_encounter(&PathBuf::from("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn run_writes_snapshot_and_resumes_from_it() {
    let first = scratch_file("first.json");
    run(CliOptions {
        encounter_path: demo_encounter(),
        moves: vec![0, 0],
        seed: 5,
        snapshot_path: Some(first.clone()),
        ..CliOptions::default()
    })
    .expect("first leg runs");
    let after_first = load_snapshot(&first).expect("snapshot written");

    let second = scratch_file("second.json");
    run(CliOptions {
        encounter_path: demo_encounter(),
        moves: vec![1],
        seed: 6,
        resume_path: Some(first.clone()),
        snapshot_path: Some(second.clone()),
        ..CliOptions::default()
    })
    .expect("second leg runs");
    let after_second = load_snapshot(&second).expect("snapshot written");

    assert_eq!(after_second.id, after_first.id);
    if after_first.is_decided() {
        assert_eq!(after_second, after_first);
    } else {
        assert_eq!(after_second.turns, after_first.turns + 1);
    }

    let _ = std::fs::remove_file(first);
    let _ = std::fs::remove_file(second);
}

#[test]
fn run_rejects_out_of_range_move() {
    let result = run(CliOptions {
        encounter_path: demo_encounter(),
        moves: vec![7],
        ..CliOptions::default()
    });
    assert!(result.is_err());
}

#[test]
fn batch_mode_runs() {
    run(CliOptions {
        encounter_path: demo_encounter(),
        moves: vec![0, 1],
        batch_runs: Some(32),
        ..CliOptions::default()
    })
    .expect("batch runs");
}

#[test]
fn resume_rejects_snapshot_with_invalid_combatants() {
    let good = serde_json::json!({
        "name": "Ada",
        "level": 50,
        "attack": 100,
        "defence": 100,
        "health": 100,
        "moves": [{"name": "Strike", "accuracy": 100, "damage": 80}]
    });
    let mut no_moves = good.clone();
    no_moves["level"] = serde_json::json!(0);
    no_moves["moves"] = serde_json::json!([]);
    let mut wild_accuracy = good.clone();
    wild_accuracy["moves"][0]["accuracy"] = serde_json::json!(200);

    for (label, one, two) in [
        ("no-moves.json", no_moves, good.clone()),
        ("wild-accuracy.json", good.clone(), wild_accuracy),
    ] {
        let path = scratch_file(label);
        let snapshot = serde_json::json!({
            "combatantOne": one,
            "combatantTwo": two,
            "turn": "One",
            "turns": 0,
            "id": "bad",
            "winner": false
        });
        std::fs::write(&path, snapshot.to_string()).expect("write snapshot");

        let err = load_snapshot(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid snapshot"));
        let result = run(CliOptions {
            encounter_path: demo_encounter(),
            moves: vec![0],
            resume_path: Some(path.clone()),
            ..CliOptions::default()
        });
        assert!(result.is_err(), "{label} was accepted");

        let _ = std::fs::remove_file(path);
    }
}

#[test]
fn batch_rejects_empty_move_script() {
    let err = run(CliOptions {
        encounter_path: demo_encounter(),
        moves: Vec::new(),
        batch_runs: Some(4),
        ..CliOptions::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("--moves"));
}

#[test]
fn batch_rejects_resume_and_snapshot() {
    for (resume_path, snapshot_path) in [
        (Some(scratch_file("unused-resume.json")), None),
        (None, Some(scratch_file("unused-snapshot.json"))),
    ] {
        let err = run(CliOptions {
            encounter_path: demo_encounter(),
            moves: vec![0, 1],
            batch_runs: Some(4),
            resume_path,
            snapshot_path: snapshot_path.clone(),
            ..CliOptions::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("--batch"));
        if let Some(path) = snapshot_path {
            assert!(!path.exists());
        }
    }
}
