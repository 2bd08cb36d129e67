use std::process::Command;

fn sandbox(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_noahs-ark"))
        .current_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/../.."))
        .args(args)
        .output()
        .expect("failed to run the noahs-ark binary")
}

#[test]
fn replays_a_script_over_the_sample_layout() {
    let output = sandbox(&["--start", "24,56", "right:8", "up:100", "chop:40,40"]);
    assert!(output.status.success(), "sandbox exited with {:?}", output.status);

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.contains("right:8: (32.00, 56.00)"), "{stdout}");
    assert!(stdout.contains("*thwack*"), "{stdout}");
    assert!(stdout.contains("trees standing: 3, wood piles: 0, food on the ground: 1"), "{stdout}");
}

#[test]
fn rejects_a_start_outside_the_world() {
    let output = sandbox(&["--start", "-40,20", "up:1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("outside the overworld"), "{stderr}");
}

#[test]
fn reports_malformed_steps() {
    let output = sandbox(&["--start", "24,56", "sideways:4"]);
    assert!(!output.status.success());
}
