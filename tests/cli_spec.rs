//! Specs for the `cand` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};
use speculate2::speculate;

fn cand(args: &[&str], config: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cand"))
        .args(args)
        .env("CANDIDATE_CONFIG", config)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run cand")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = dir.path().join("config.json");
        fs::write(&config, "{}").expect("Failed to write config");
        let pack = dir.path().join("pack.json");
        candidate::kp::save(&pack, &json!({"name": "Åsa", "modes": ["remote"]})).expect("Failed to save");
    }

    describe "show" {
        it "prints the pack as indented JSON" {
            let output = cand(&["show", pack.to_str().unwrap()], &config);
            assert!(output.status.success());
            assert_eq!(
                stdout(&output),
                "{\n  \"modes\": [\n    \"remote\"\n  ],\n  \"name\": \"Åsa\"\n}\n"
            );
        }

        it "keeps the key order of a hand-written file" {
            let loose = dir.path().join("loose.json");
            fs::write(&loose, r#"{"zeta": [1.5], "alpha": "ü"}"#).unwrap();

            let output = cand(&["show", loose.to_str().unwrap()], &config);
            assert!(output.status.success());
            assert_eq!(
                stdout(&output),
                "{\n  \"zeta\": [\n    1.5\n  ],\n  \"alpha\": \"ü\"\n}\n"
            );
        }

        it "exits with status 2 without a path" {
            let output = cand(&["show"], &config);
            assert_eq!(output.status.code(), Some(2));
        }

        it "fails for a missing file" {
            let missing = dir.path().join("missing.json");
            let output = cand(&["show", missing.to_str().unwrap()], &config);
            assert!(!output.status.success());
        }
    }

    describe "verify" {
        it "passes for a canonical pack" {
            let output = cand(&["verify", pack.to_str().unwrap()], &config);
            assert_eq!(output.status.code(), Some(0));
            assert_eq!(stdout(&output), "Round-trip byte-identical: PASS\n");
        }

        it "fails with status 3 for a non-canonical file" {
            let loose = dir.path().join("loose.json");
            fs::write(&loose, "{\"b\": 1, \"a\": 2}\n").unwrap();

            let output = cand(&["verify", loose.to_str().unwrap()], &config);
            assert_eq!(output.status.code(), Some(3));
            assert!(stdout(&output).starts_with("Round-trip byte-identical: FAIL\n"));
        }

        it "exits with status 2 for a missing file" {
            let missing = dir.path().join("missing.json");
            let output = cand(&["verify", missing.to_str().unwrap()], &config);
            assert_eq!(output.status.code(), Some(2));
            assert!(stdout(&output).starts_with("Missing source file:"));
        }
    }

    describe "save" {
        it "rewrites a document canonically" {
            let loose = dir.path().join("loose.json");
            let out = dir.path().join("out").join("pack.json");
            fs::write(&loose, "{ \"b\": [1, 2],\n  \"a\": \"ß\" }").unwrap();

            let output = cand(&["save", loose.to_str().unwrap(), out.to_str().unwrap()], &config);
            assert!(output.status.success());
            assert_eq!(fs::read_to_string(&out).unwrap(), "{\"a\":\"ß\",\"b\":[1,2]}");
        }
    }

    describe "gate" {
        before {
            let job = dir.path().join("job.json");
            let cand_profile = dir.path().join("candidate.json");
            fs::write(&job, r#"{"work_mode": "remote", "compensation": {"min": 100, "max": 120}}"#).unwrap();
        }

        it "prints a passing result" {
            fs::write(&cand_profile, r#"{"work_modes": ["remote"], "compensation": 110}"#).unwrap();

            let output = cand(&["gate", job.to_str().unwrap(), cand_profile.to_str().unwrap()], &config);
            assert_eq!(output.status.code(), Some(0));
            let result: Value = serde_json::from_str(&stdout(&output)).unwrap();
            assert_eq!(result, json!({"passed": true, "failed_gate": null, "reasons": []}));
        }

        it "exits with status 1 and names the failing gate" {
            fs::write(&cand_profile, r#"{"work_mode": "onsite"}"#).unwrap();

            let output = cand(&["gate", job.to_str().unwrap(), cand_profile.to_str().unwrap()], &config);
            assert_eq!(output.status.code(), Some(1));
            let result: Value = serde_json::from_str(&stdout(&output)).unwrap();
            assert_eq!(result["failed_gate"], json!("work_mode"));
            assert_eq!(result["reasons"], json!(["work mode mismatch"]));
        }

        it "honors aliases from the config file" {
            fs::write(&config, r#"{"gates": {"candidate_work_mode_keys": ["remote_ok"]}}"#).unwrap();
            fs::write(&cand_profile, r#"{"remote_ok": "remote", "compensation": 100}"#).unwrap();

            let output = cand(&["gate", job.to_str().unwrap(), cand_profile.to_str().unwrap()], &config);
            assert_eq!(output.status.code(), Some(0));
        }
    }
}
