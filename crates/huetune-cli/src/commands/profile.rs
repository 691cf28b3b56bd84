use anyhow::Result;
use huetune_core::color::{self, Hsv};
use huetune_core::context::contextual_phrases;
use huetune_core::model::{ImageSignal, Rgb};
use huetune_core::mood::score_labels;

/// Print the colour and mood analysis of a signal. Needs no network.
pub fn show_profile(labels: Vec<String>, color: Rgb) -> Result<()> {
    let signal = ImageSignal::new(labels, color);

    println!("Image Signal");
    println!("============\n");
    println!("  labels: {}", signal.labels.join(", "));
    println!("  color:  {} ({})", signal.color, color::describe(signal.color));

    println!("\nContextual phrases:");
    for phrase in contextual_phrases(&signal) {
        println!("  - {phrase}");
    }

    let hsv = Hsv::from_rgb(signal.color);
    let profile = color::analyze(signal.color);
    println!("\nColour profile:");
    println!(
        "  hsv:          {:.0}°, {:.0}%, {:.0}%",
        hsv.hue, hsv.saturation, hsv.value
    );
    println!("  energy:       {:.2}", profile.energy);
    println!("  valence:      {:.2}", profile.valence);
    println!("  acousticness: {:.2}", profile.acousticness);

    let mood = score_labels(&signal.labels);
    println!("\nMood:");
    if mood.scores.iter().all(|s| s.match_count == 0) {
        println!("  dominant: {} (default, no keyword matched)", mood.dominant_mood);
    } else {
        println!(
            "  dominant: {} (confidence {:.2})",
            mood.dominant_mood, mood.confidence
        );
    }
    for score in mood.scores.iter().filter(|s| s.match_count > 0) {
        println!(
            "  {:<12} {} match(es), score {:.2}, normalized {:.2}",
            score.mood.as_str(),
            score.match_count,
            score.score,
            score.normalized_score
        );
    }

    Ok(())
}
