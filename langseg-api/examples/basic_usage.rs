//! Basic usage of the langseg API

use langseg_api::{get_counts, get_spans, set_filters, LangSegment, SegmenterConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = "你的名字叫<ja>佐々木？<ja>吗？韩语中的안녕 오빠读什么呢？あなたの体育の先生は誰ですか? 此次发布会带来了四款iPhone 15系列机型和三款Apple Watch等一系列新品，这次的iPad Air采用了LCD屏幕";

    // Shared processor
    println!("=== Shared processor ===");
    for span in get_spans(text) {
        println!("  {:>2}: {:?}", span.language, span.text);
    }

    let counts = get_counts();
    println!("Counts: {counts:?}");
    if let Some(top) = counts.first() {
        println!("Dominant language: {} ({} chars)", top.language, top.weight);
    }

    // Restricting the output languages
    println!("\n=== Filtered to zh and en ===");
    set_filters(["zh", "en"])?;
    for span in get_spans(text) {
        println!("  {:>2}: {:?}", span.language, span.text);
    }

    // A dedicated processor with its own configuration
    println!("\n=== Dedicated processor ===");
    let config = SegmenterConfig::builder()
        .filters(["all"])
        .dispatch_numbers(true)
        .build()?;
    let mut segmenter = LangSegment::with_config(config)?;
    for span in segmenter.get_spans("价格是3.5万，iPad Air。") {
        println!("  {:>2}: {:?}", span.language, span.text);
    }

    #[cfg(feature = "serde")]
    println!("\nJSON: {}", langseg_api::spans_to_json(&segmenter.get_spans("오빠"))?);

    Ok(())
}
