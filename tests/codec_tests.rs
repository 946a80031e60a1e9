use morse_translator_core::symbol::SymbolTable;
use morse_translator_core::{Timing, UNKNOWN_MARKER, decode, encode, schedule};
use pretty_assertions::assert_eq;

#[test]
fn every_character_survives_a_round_trip() {
    for (ch, _) in SymbolTable::global().dictionary() {
        let upper: String = ch.to_uppercase().collect();
        assert_eq!(decode(&encode(&upper)), upper);
    }
}

#[test]
fn lowercase_input_decodes_uppercase() {
    assert_eq!(decode(&encode("the quick brown fox")), "THE QUICK BROWN FOX");
}

#[test]
fn multiline_text_keeps_line_breaks_in_morse() {
    let morse = encode("SOS\nSOS");
    assert_eq!(morse, "... --- ... \n... --- ...");
    // Line breaks are whitespace to the decoder.
    assert_eq!(decode(&morse), "SOSSOS");
}

#[test]
fn unknown_code_is_marked_not_dropped() {
    let text = decode("... -.-.- ...");
    assert_eq!(text, format!("S{UNKNOWN_MARKER}S"));
}

#[test]
fn encoded_text_schedules_standard_spacing() {
    // "E E": dot, char gap, slash, char gap, dot.
    let morse = encode("E E");
    assert_eq!(morse, ". / .");
    let sched = schedule::compile(&morse, Timing::from_wpm(20).unwrap());
    assert_eq!(sched.pulse_count(), 2);
    assert_eq!(sched.total.as_millis(), 120 + 120 + 360 + 120 + 120);
}
