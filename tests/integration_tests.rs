//! Integration tests for the preprocessing pipeline
//!
//! The concrete cases come from the reference segmenter's test suite and
//! must hold byte for byte.

use proptest::prelude::*;
use sylcut::patterns::{is_email, is_url};
use sylcut::{
    compute_stats, default_steps, expand_camel_case_to_tokens, find_words_from_preds,
    get_char_category, parse_model_params, preprocess, preprocess_default, split_long_sequence,
    syllable_to_token, syllable_tokenize, CharCategory, LabelScheme, LongSequenceSplitter,
    MarkedText, OversizePolicy, Step, SylcutError, Syllabifier, TokenClass, Vocabulary,
};

// =============================================================================
// Normalizer
// =============================================================================

#[test]
fn test_preprocess_tags_and_digits() {
    let steps = vec![
        Step::from_name("remove_tags").unwrap(),
        Step::from_name("thai_digit_to_arabic_digit").unwrap(),
    ];
    assert_eq!(
        preprocess("<AZ>This is no. ๑,๒๐๐ </AZ>", &steps),
        "This is no. 1,200 "
    );
}

#[test]
fn test_preprocess_default_with_extra_rule() {
    let mut steps = default_steps();
    steps.push(Step::custom(|t| t.replace("ชอบ", "เกลียด")));
    assert_eq!(
        preprocess("<AZ>ผมชอบทะเล no ๑,๒๐๐ </AZ>", &steps),
        "ผมเกลียดทะเล no 1,200 "
    );
}

#[test]
fn test_preprocess_default_keeps_angle_brackets_in_text() {
    assert_eq!(preprocess_default("ถ้า a<b และ c>d"), "ถ้า a<b และ c>d");
    assert_eq!(preprocess_default("<NE>ผม</NE> ๒<๓"), "ผม 2<3");
}

// =============================================================================
// Syllable tokenizer
// =============================================================================

#[test]
fn test_syllable_tokenize_cases() {
    let cases = [
        ("วันนี้ โรงเรียนเปิด", "วัน~นี้~ ~โรง~เรียน~เปิด"),
        ("วันนี้   โรงเรียนเปิด", "วัน~นี้~   ~โรง~เรียน~เปิด"),
        ("อะไร... กันน่ะ", "อะ~ไร~...~ ~กัน~น่ะ"),
        ("เทียมกัน ...", "เทียม~กัน~ ~..."),
        ("หน้าที่ 19...", "หน้า~ที่~ ~19~..."),
    ];
    for (text, expected) in cases {
        let expected: Vec<&str> = expected.split('~').collect();
        assert_eq!(syllable_tokenize(text), expected, "input: {}", text);
    }
}

#[test]
fn test_tokenizer_precedence() {
    assert_eq!(
        syllable_tokenize("อ่าน http://soccersuck.com/news ครับ"),
        vec!["อ่าน", " ", "http://soccersuck.com/news", " ", "ครับ"]
    );
    assert_eq!(syllable_tokenize("IndianInstitute"), vec!["Indian", "Institute"]);
}

#[test]
fn test_dangling_tone_mark_attaches() {
    let units = syllable_tokenize("ก่่า");
    assert_eq!(units.concat(), "ก่่า");
    assert_eq!(units.len(), 1);
}

#[test]
fn test_char_categories() {
    assert_eq!(get_char_category('ก'), CharCategory::ThaiConsonant);
    assert_eq!(get_char_category('่'), CharCategory::ThaiToneMark);
    assert_eq!(get_char_category('เ'), CharCategory::ThaiLeadingVowel);
    assert_eq!(get_char_category('๑'), CharCategory::ThaiDigit);
    assert_eq!(get_char_category('7'), CharCategory::ArabicDigit);
    assert_eq!(get_char_category('x'), CharCategory::LatinLetter);
    assert_eq!(get_char_category(' '), CharCategory::Whitespace);
    assert_eq!(get_char_category('就'), CharCategory::Other);
}

// =============================================================================
// Patterns
// =============================================================================

#[test]
fn test_url_pattern() {
    for url in ["http://soccersuck.com", "www.abc.com", "www.080b.com", "https://www.080b.com"] {
        assert!(is_url(url), "{}", url);
    }
    assert!(!is_url("something"));
    assert!(!is_url("https:www.080b.com"));
}

#[test]
fn test_email_pattern() {
    assert!(is_email("min@adb.com"));
    assert!(!is_email("shoulnotmatch@"));
    assert!(!is_email("something."));
    assert!(!is_email("min@adb.com|"));
}

#[test]
fn test_camel_case_expansion() {
    let cases = [
        ("IndianInstituteofAdvancedStudies", "Indian Instituteof Advanced Studies"),
        ("UnitedNation", "United Nation"),
        ("KOMCHADLUEK", "KOMCHADLUEK"),
    ];
    for (text, expected) in cases {
        assert_eq!(expand_camel_case_to_tokens(text).join(" "), expected);
    }
}

// =============================================================================
// Unit classifier
// =============================================================================

#[test]
fn test_syllable_to_token() {
    assert_eq!(syllable_to_token("Abce"), "<ENGLISH>");
    assert_eq!(syllable_to_token("034343"), "<NUMBER>");
    assert_eq!(syllable_to_token("WWWW.KABC.COM"), "<URL>");
    assert_eq!(syllable_to_token("   "), "<SPACE>");
    assert_eq!(syllable_to_token(" "), "<SPACE>");
    assert_eq!(syllable_to_token("!"), "<PUNC>");
    assert_eq!(syllable_to_token("เรียน"), "เรียน");
    assert_eq!(TokenClass::of("เรียน").token(), None);
}

// =============================================================================
// Label schemes
// =============================================================================

#[test]
fn test_find_words_from_preds() {
    let cases = [("acat", "1100", "a|cat"), ("ohmygood", "10101000", "oh|my|good")];
    for (tokens, preds, expected) in cases {
        let chars: Vec<String> = tokens.chars().map(String::from).collect();
        let preds: Vec<u8> = preds.bytes().map(|b| b - b'0').collect();
        let words = find_words_from_preds(&chars, &preds).unwrap();
        assert_eq!(words, expected.split('|').collect::<Vec<_>>());
    }
}

#[test]
fn test_scheme_encode_decode() {
    let scheme: LabelScheme = "BI".parse().unwrap();
    let example = scheme.encode("วันนี้| |โรงเรียน|เปิด");
    assert_eq!(example.units.len(), example.labels.len());
    assert_eq!(example.labels, vec![1, 0, 1, 1, 0, 1]);

    let words = scheme.decode_words(&example.labels, &example.units).unwrap();
    assert_eq!(words, vec!["วันนี้", " ", "โรงเรียน", "เปิด"]);
}

#[test]
fn test_round_trip_on_real_words() {
    let references = [
        "สวัสดี|ครับ",
        "ภาษา|ไทย",
        "มี|ปลา",
        "ตา|กลม",
        "ผม|ไม่|ชอบ|กิน|ผัก",
        "วันนี้| |โรงเรียน|เปิด",
    ];
    for scheme in [
        LabelScheme::Binary,
        LabelScheme::default(),
        "BIO".parse().unwrap(),
        LabelScheme::SchemeA,
    ] {
        for marked in references {
            let example = scheme.encode(marked);
            let words = scheme.decode_words(&example.labels, &example.units).unwrap();
            let expected: Vec<&str> = marked.split('|').collect();
            assert_eq!(words, expected, "{} with {}", marked, scheme);
        }
    }
}

#[test]
fn test_decode_length_mismatch() {
    let units = syllable_tokenize("วันนี้ โรงเรียนเปิด");
    let err = LabelScheme::Binary.decode(&[1, 0, 1], &units).unwrap_err();
    assert!(matches!(
        err,
        SylcutError::LengthMismatch { labels: 3, units: 6 }
    ));
}

#[test]
fn test_unknown_scheme_fails_fast() {
    let params = parse_model_params("embs:8|conv:16|l1:16|do:0.0|oc:BIES").unwrap();
    assert!(matches!(
        params.label_scheme(),
        Err(SylcutError::UnknownScheme(name)) if name == "BIES"
    ));
}

// =============================================================================
// Long-sequence splitter
// =============================================================================

#[test]
fn test_long_txt_sequences() {
    let cases: [(&str, &[&str], usize); 2] = [
        (
            "ผม|ไม่|ชอบ|กิน|ผัก| |แต่|นาย| |สมศักษ์ ใจดี| |ชอบ|มากๆ",
            &["ผม|ไม่|ชอบ|กิน|ผัก| |แต่|นาย", " |สมศักษ์ ใจดี| ", "ชอบ|มากๆ"],
            8,
        ),
        ("ผม|ไม่|ชอบ|กิน|ผัก", &["ผม|ไม่|ชอบ", "กิน|ผัก"], 3),
    ];
    for (text, expected, max_length) in cases {
        let pieces = split_long_sequence(text, max_length).unwrap();
        assert_eq!(pieces, expected);
        for piece in &pieces {
            assert!(syllable_tokenize(&piece.replace('|', "")).len() <= max_length);
        }
    }
}

#[test]
fn test_oversize_word_policy() {
    assert!(matches!(
        split_long_sequence("สมศักษ์ ใจดี|มาก", 2),
        Err(SylcutError::WordTooLong { units: 5, .. })
    ));
    let splitter = LongSequenceSplitter::new(2)
        .unwrap()
        .with_policy(OversizePolicy::Split);
    let pieces = splitter.split("สมศักษ์ ใจดี|มาก").unwrap();
    assert_eq!(pieces.concat().replace('|', ""), "สมศักษ์ ใจดีมาก");
}

// =============================================================================
// Features and evaluation
// =============================================================================

#[test]
fn test_vocabulary_from_encoded_examples() {
    let scheme = LabelScheme::default();
    let examples = vec![
        scheme.encode("ผม|กิน|ข้าว| |12|บาท"),
        scheme.encode("ผม|กิน| |www.abc.com"),
    ];
    let vocab = Vocabulary::build(&examples, 2);
    let ids = vocab.encode_units(&["ผม", "99", "ข้าว"]);
    assert_eq!(ids[0], vocab.id("ผม"));
    assert_eq!(ids[1], sylcut::vocabulary::UNK_ID);
    assert_eq!(ids[2], sylcut::vocabulary::UNK_ID);
}

#[test]
fn test_compute_stats_perfect() {
    let stats = compute_stats("ผม|ไม่|ชอบ", "ผม|ไม่|ชอบ").unwrap();
    assert_eq!(stats.char_f1(), 1.0);
    assert_eq!(stats.word_f1(), 1.0);
}

// =============================================================================
// Properties
// =============================================================================

/// Group the units of `text` into words, starting a word where `flags` says
fn marked_from_units(text: &str, flags: &[bool]) -> (String, Vec<String>) {
    let units = syllable_tokenize(text);
    let mut words: Vec<String> = Vec::new();
    for (i, unit) in units.iter().enumerate() {
        match words.last_mut() {
            Some(word) if !flags.get(i).copied().unwrap_or(false) => word.push_str(unit),
            _ => words.push(unit.clone()),
        }
    }
    (words.join("|"), words)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_units_cover_input(text in "\\PC{0,200}") {
        prop_assert_eq!(syllable_tokenize(&text).concat(), text);
    }

    #[test]
    fn prop_thai_units_cover_input(text in "[ก-ฮะ-ฺเ-๛ a-zA-Z0-9.,!()]{0,120}") {
        let units = Syllabifier::new(&text).make_units();
        let mut offset = 0;
        for unit in &units {
            prop_assert_eq!(unit.start, offset);
            prop_assert!(unit.len > 0);
            offset = unit.end();
        }
        prop_assert_eq!(offset, text.len());
    }

    #[test]
    fn prop_tokenize_is_deterministic(text in "\\PC{0,200}") {
        prop_assert_eq!(syllable_tokenize(&text), syllable_tokenize(&text));
    }

    #[test]
    fn prop_encode_decode_round_trip(
        text in "[ก-ฮะ-ฺเ-๛ a-zA-Z0-9.,!@]{0,120}",
        flags in proptest::collection::vec(any::<bool>(), 0..200),
    ) {
        let (marked, words) = marked_from_units(&text, &flags);
        for scheme in ["binary", "BI", "BIO", "SchemeA"] {
            let scheme: LabelScheme = scheme.parse().unwrap();
            let example = scheme.encode(&marked);
            prop_assert!(example.labels.iter().all(|l| usize::from(*l) < scheme.num_classes()));
            let decoded = scheme.decode_words(&example.labels, &example.units).unwrap();
            prop_assert_eq!(&decoded, &words);
        }
    }

    #[test]
    fn prop_default_normalization_is_idempotent(text in "\\PC{0,200}") {
        let once = preprocess_default(&text);
        prop_assume!(Step::RemoveTags.apply(&once) == once);
        prop_assert_eq!(preprocess_default(&once), once);
    }

    #[test]
    fn prop_split_pieces_rejoin(
        text in "[ก-ฮะ-ฺเ-๛ a-z0-9.]{1,120}",
        flags in proptest::collection::vec(any::<bool>(), 0..200),
        max_length in 1usize..16,
    ) {
        let (marked, _) = marked_from_units(&text, &flags);
        if let Ok(pieces) = split_long_sequence(&marked, max_length) {
            prop_assert_eq!(pieces.join("|"), marked.clone());
            let reference = MarkedText::parse(&marked);
            prop_assert!(pieces.len() <= Syllabifier::new(reference.raw()).make_units().len());
        }
    }
}
