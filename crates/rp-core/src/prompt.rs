use crate::color::PaintColor;

/// InstructPix2Pix version hash used for every prediction.
pub const MODEL_VERSION: &str = "30c1d0b916a6f8efce20493f5d61ee27491ab2a60437c13c588468b9810ec23f";

pub const NUM_INFERENCE_STEPS: u32 = 30;
/// Higher = more faithful to the original photo.
pub const IMAGE_GUIDANCE_SCALE: f64 = 1.8;
/// Higher = follows the prompt more literally.
pub const GUIDANCE_SCALE: f64 = 9.0;

/// Instruction sent to the model: recolor the walls, touch nothing else.
pub fn repaint_prompt(color: &PaintColor) -> String {
    format!(
        "Repaint only the walls to {color} color. Keep all furniture, objects, floor, \
         ceiling, and lighting exactly the same. High quality interior photography."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_color_verbatim() {
        for hex in ["#FFFFFF", "#87CEEB", "#B2AC88"] {
            let color: PaintColor = hex.parse().unwrap();
            assert!(repaint_prompt(&color).contains(hex));
        }
    }

    #[test]
    fn test_prompt_keeps_preservation_clause() {
        let color: PaintColor = "#F5F5DC".parse().unwrap();
        let prompt = repaint_prompt(&color);
        assert!(prompt.contains("Keep all furniture"));
        assert!(prompt.contains("lighting exactly the same"));
    }
}
