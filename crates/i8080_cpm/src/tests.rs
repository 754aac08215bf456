use super::*;
use i8080::MEMORY_SIZE;

/// Prints "OK" through function 9, "!" through function 2, then warm boots.
const HELLO: &[u8] = &[
    0x0E, 0x09, // 0100: MVI C,9
    0x11, 0x12, 0x01, // 0102: LXI D,0112
    0xCD, 0x05, 0x00, // 0105: CALL 0005
    0x0E, 0x02, // 0108: MVI C,2
    0x1E, b'!', // 010A: MVI E,'!'
    0xCD, 0x05, 0x00, // 010C: CALL 0005
    0xC3, 0x00, 0x00, // 010F: JMP 0000
    b'O', b'K', b'$', // 0112
];

fn run_program(rom: &[u8]) -> RunReport {
    run(RunConfig::builder().rom(rom.to_vec()).build()).unwrap()
}

#[test]
fn image_layout() {
    let bus = load_image(&[0xAA, 0xBB]).unwrap();
    let mem = bus.memory();
    assert_eq!(&mem[0x0000..0x0002], &[0xD3, FINISH_PORT]);
    assert_eq!(&mem[0x0005..0x0008], &[0xD3, CONSOLE_PORT, 0xC9]);
    assert_eq!(&mem[0x0100..0x0102], &[0xAA, 0xBB]);
    assert_eq!(mem[0x0102], 0);
}

#[test]
fn image_must_fit_above_tpa() {
    let largest = vec![0u8; MEMORY_SIZE - TPA_START as usize];
    assert!(load_image(&largest).is_ok());

    let too_big = vec![0u8; largest.len() + 1];
    let err = load_image(&too_big).unwrap_err();
    assert!(err.to_string().contains("only 65280 fit"), "{err}");
}

#[test]
fn bdos_console_output() {
    let report = run_program(HELLO);
    assert_eq!(report.stop, StopReason::Finished);
    assert!(report.finished());
    assert_eq!(report.output, "OK!");
    assert_eq!(report.instructions, 12);
    // 2 x (MVI, CALL, OUT, RET) + LXI + MVI + JMP + OUT
    assert_eq!(report.cycles, 2 * (7 + 17 + 10 + 10) + 10 + 7 + 10 + 10);
}

#[test]
fn unknown_bdos_functions_print_nothing() {
    // MVI C,0B ; CALL 0005 ; JMP 0000
    let report = run_program(&[0x0E, 0x0B, 0xCD, 0x05, 0x00, 0xC3, 0x00, 0x00]);
    assert!(report.finished());
    assert!(report.output.is_empty());
}

#[test]
fn halt_stops_the_run() {
    let report = run_program(&[0x00, 0x76]);
    assert_eq!(report.stop, StopReason::Halted);
    assert_eq!(report.instructions, 2);
    assert_eq!(report.cycles, 4);
}

#[test]
fn cycle_budget_stops_the_run() {
    // JMP 0100
    let config = RunConfig::builder()
        .rom(vec![0xC3, 0x00, 0x01])
        .max_cycles(Some(100))
        .build();
    let report = run(config).unwrap();
    assert_eq!(report.stop, StopReason::CycleLimit);
    assert_eq!(report.cycles, 100);
    assert_eq!(report.instructions, 10);
}

#[test]
fn strict_mode_halts_on_undocumented_opcode() {
    let rom = [0x08, 0xC3, 0x00, 0x00];
    assert!(run_program(&rom).finished());

    let config = RunConfig::builder()
        .rom(rom.to_vec())
        .undocumented(UndocumentedOpcodes::Fault)
        .build();
    let report = run(config).unwrap();
    assert_eq!(report.stop, StopReason::Halted);
    assert_eq!(report.cycles, 0);
}

fn load_test_rom(name: &str) -> Vec<u8> {
    use std::path::PathBuf;

    // Support both workspace-root and crate-relative working directories.
    let candidates = [
        PathBuf::from("assets/roms/8080_tests").join(name),
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../assets/roms/8080_tests")
            .join(name),
    ];

    for path in &candidates {
        if let Ok(data) = std::fs::read(path) {
            return data;
        }
    }

    panic!("{} not found. Tried: {:?}", name, candidates)
}

fn run_rom(name: &str, expected_cycles: u64, expected_output: &str) {
    let report = run_program(&load_test_rom(name));
    assert!(report.finished(), "{} stopped with {:?}", name, report.stop);
    assert!(
        report.output.contains(expected_output),
        "{} output:\n{}",
        name,
        report.output
    );
    assert!(!report.output.contains("ERROR"), "{}", report.output);
    assert_eq!(report.cycles, expected_cycles, "cycle count for {}", name);
}

// These need the diagnostic ROMs under assets/roms/8080_tests and the larger
// ones run for a long time, so they only run on request:
// `cargo test -p i8080_cpm --release -- --ignored`.

#[test]
#[ignore]
fn tst8080() {
    run_rom("TST8080.COM", 4_924, "CPU IS OPERATIONAL");
}

#[test]
#[ignore]
fn preliminary_8080pre() {
    run_rom("8080PRE.COM", 7_817, "8080 Preliminary tests complete");
}

#[test]
#[ignore]
fn cputest() {
    run_rom("CPUTEST.COM", 255_653_383, "CPU TESTS OK");
}

#[test]
#[ignore]
fn exerciser_8080exm() {
    run_rom("8080EXM.COM", 23_803_381_171, "Tests complete");
}
