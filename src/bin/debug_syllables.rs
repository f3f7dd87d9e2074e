use sylcut::{preprocess_default, Syllabifier, TokenClass};

fn main() {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "<AZ>อะไร... กันน่ะ ดู www.abc.com ได้ทุกวัน ๒๔ ชม.</AZ>".to_string());
    println!("Input: {}", input);

    let text = preprocess_default(&input);
    println!("Normalized: {}", text);

    let syllabifier = Syllabifier::new(&text);
    let units = syllabifier.make_units();

    println!("\nUnits:");
    for (i, unit) in units.iter().enumerate() {
        let s = unit.as_str(&text);
        println!(
            "  {}: {:?} - kind: {}, span: {}..{}, class: {:?}",
            i,
            s,
            unit.kind.as_str(),
            unit.start,
            unit.end(),
            TokenClass::of(s)
        );
    }

    let covered: String = units.iter().map(|u| u.as_str(&text)).collect();
    println!("\nUnits cover input: {}", covered == text);
}
