// End-to-end runs over files: mine readings and messages, write both logs,
// read them back and merge them into one trace.

use plc_event_miner::formats::trace_text::strip_interval;
use plc_event_miner::{read_trace, LogMerger, Miner, MinerError, PlcEvent, TraceEntry};
use std::fs;
use std::path::Path;

const READINGS: &str = "\
TimeStamp,PLC1_Level,PLC1_Pump,PLC2_Mode,PLC3_Const\r
10:00:00.000,10,0,auto,5\r
10:00:01.000,12,0,manual,5\r
10:00:02.000,15,1,auto,N/A\r
10:00:03.000,14,1,auto,5\r
10:00:04.000,14,N/A,auto,5\r
10:00:05.000,16,0,auto,5\r
";

const CAPTURE: &str = "\
No.,Time,Source,Destination,Protocol,Length,Function Code,Reference Number,Data,Info\r
1,2022-03-23 09:59:58.000,PLC1_host,PLC2,Modbus/TCP,66,Write Single Register,4,A,Query\r
2,2022-03-23 09:59:59.500,PLC1_host,PLC2,Modbus/TCP,66,Write Single Register,4,B,Query\r
3,2022-03-23 09:59:59.600,PLC2,PLC1_host,Modbus/TCP,66,Write Single Register,4,Z,Response\r
4,2022-03-23 10:00:02.500,PLC1_host,PLC2,Modbus/TCP,66,Read Holding Registers,4,C,Query\r
5,2022-03-23 10:00:04.500,PLC1_host,PLC2,Modbus/TCP,66,Write Single Register,4,C,Query\r
";

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_mine_and_merge_files() {
    let dir = tempfile::tempdir().unwrap();
    let readings_csv = write_file(dir.path(), "readings.csv", READINGS);
    let capture_csv = write_file(dir.path(), "capture.csv", CAPTURE);

    let miner = Miner::new();

    let readings = miner.mine_readings_file(&readings_csv).unwrap();
    let unresolved: Vec<&str> = readings
        .classification
        .unresolved()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(unresolved, vec!["TimeStamp", "PLC2_Mode"]);
    assert_eq!(
        readings.log.render_text(),
        "10:00:02.000: s PLC1 PLC1_Pump [0->1], \n\
         10:00:03.000: s PLC1 PLC1_Level [ASCENDING->DESCENDING] (10-14), \n\
         10:00:05.000: s PLC1 PLC1_Level [DESCENDING->ASCENDING] (14-16), s PLC1 PLC1_Pump [1->0], \n"
    );

    let messages = miner.mine_messages_file(&capture_csv).unwrap();
    assert_eq!(
        messages.render_text(),
        "2022-03-23 09:59:59.500: m PLC1 PLC1_host -> PLC2 [4=B], \n\
         2022-03-23 10:00:04.500: m PLC1 PLC1_host -> PLC2 [4=C], \n"
    );

    let readings_txt = dir.path().join("readings.txt");
    let messages_txt = dir.path().join("messages.txt");
    readings.log.write_text(&readings_txt).unwrap();
    messages.write_text(&messages_txt).unwrap();

    let first = read_trace(&readings_txt).unwrap();
    let second = read_trace(&messages_txt).unwrap();
    let merged = LogMerger::new()
        .with_patch_date("2022-03-23")
        .merge(&[first.as_slice(), second.as_slice()])
        .unwrap();

    let merged_txt = dir.path().join("merged.txt");
    let merged_csv = dir.path().join("merged.csv");
    merged.write_text(&merged_txt).unwrap();
    merged.write_csv(&merged_csv).unwrap();

    assert_eq!(
        fs::read_to_string(&merged_txt).unwrap(),
        "2022-03-23 09:59:59.500: m PLC1 PLC1_host -> PLC2 [4=B], \n\
         2022-03-23 10:00:02.000: s PLC1 PLC1_Pump [0->1], \n\
         2022-03-23 10:00:03.000: s PLC1 PLC1_Level [ASCENDING->DESCENDING] (10-14), \n\
         2022-03-23 10:00:04.500: m PLC1 PLC1_host -> PLC2 [4=C], \n\
         2022-03-23 10:00:05.000: s PLC1 PLC1_Level [DESCENDING->ASCENDING] (14-16), s PLC1 PLC1_Pump [1->0], \n"
    );
    assert_eq!(
        fs::read_to_string(&merged_csv).unwrap(),
        "2022-03-23 09:59:59.500,m,PLC1,PLC1_host -> PLC2 [4=B], \n\
         2022-03-23 10:00:02.000,s,PLC1,PLC1_Pump [0->1], \n\
         2022-03-23 10:00:03.000,s,PLC1,PLC1_Level [ASCENDING->DESCENDING] , \n\
         2022-03-23 10:00:04.500,m,PLC1,PLC1_host -> PLC2 [4=C], \n\
         2022-03-23 10:00:05.000,s,PLC1,PLC1_Level [DESCENDING->ASCENDING] , s PLC1 PLC1_Pump [1->0], \n"
    );
}

#[test]
fn test_every_log_entry_has_events() {
    let dir = tempfile::tempdir().unwrap();
    let readings_csv = write_file(dir.path(), "readings.csv", READINGS);
    let outcome = Miner::new().mine_readings_file(&readings_csv).unwrap();

    assert!(!outcome.log.is_empty());
    for entry in outcome.log.entries() {
        assert!(!entry.events().is_empty());
    }
}

#[test]
fn test_message_rendering_survives_interval_stripping() {
    let events = [
        ("PLC1", "PLC2", "4", "17"),
        ("10.0.0.1", "10.0.0.2", "40001", "0.5"),
        ("HMI_1", "PLC3", "12", "(1-2)"),
    ];

    for (source, destination, register, data) in events {
        let event = PlcEvent::Message {
            source: source.to_string(),
            destination: destination.to_string(),
            register: register.to_string(),
            data: data.to_string(),
        };
        let stripped = strip_interval(&event.to_text());
        let inner = stripped
            .rsplit_once('[')
            .and_then(|(_, rest)| rest.split_once(']'))
            .map(|(inner, _)| inner)
            .unwrap();
        assert_eq!(inner.split_once('='), Some((register, data)));
    }
}

#[test]
fn test_unparseable_trace_fails_merge() {
    let dir = tempfile::tempdir().unwrap();
    let trace = write_file(
        dir.path(),
        "trace.txt",
        "2022-03-23 10:00:00.000: a\n23/03/2022 10:00:01: b\n",
    );

    let entries = read_trace(&trace).unwrap();
    let result = LogMerger::new().merge(&[entries.as_slice()]);
    assert!(matches!(result, Err(MinerError::InvalidTimestamp(_))));
}

#[test]
fn test_missing_input_file() {
    let result = Miner::new().mine_messages_file(Path::new("/nonexistent/capture.csv"));
    assert!(matches!(result, Err(MinerError::Io(_))));

    let direct = vec![TraceEntry::new("2022-03-23 10:00:00.000", "x")];
    assert_eq!(LogMerger::new().merge(&[direct.as_slice()]).unwrap().len(), 1);
}
