use chrf_core::report::{ReportOptions, write_sentence};
use chrf_core::{EvalConfig, Evaluator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // chrF3 on character 6-grams, the usual setting for MT evaluation
    let mut config = EvalConfig::new(6, 3.0)?;

    // Spaces count as characters unless disabled
    config.use_space = true;

    // Weights are normalized, so "1,1,1,1,2,2" gives 1/8 and 2/8
    config.set_weights(vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0])?;

    // Invalid weights are rejected (one weight per order is required)
    match config.clone().set_weights(vec![1.0, 2.0]) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {}", e),
    }

    let evaluator = Evaluator::new(config);

    let hypotheses = ["the cat sat on the mat", "a quick brown fox"];
    let references = [
        vec!["the cat sat on a mat", "there was a cat on the mat"],
        vec!["the quick brown fox"],
    ];

    // Per-sentence reports are printed while the corpus is being scored
    let options = ReportOptions { sentence_level: true, print_missing: true, ..Default::default() };
    let mut out = std::io::stdout();
    let stats = evaluator.evaluate_with(hypotheses, &references, |row, sentence| {
        write_sentence(&mut out, row + 1, sentence, evaluator.config(), &options)?;
        Ok(())
    })?;

    let score = evaluator.summarize(&stats);
    println!("corpus chrF3 = {:.4} (P = {:.4}, R = {:.4})", score.f, score.precision, score.recall);

    // Hypothesis and reference counts must match
    match evaluator.evaluate(["one", "two"], [["one"]]) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {}", e),
    }

    Ok(())
}
