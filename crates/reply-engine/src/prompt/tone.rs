use reply_core::Tone;

pub fn tone_guidance(tone: Tone) -> &'static str {
    match tone {
        Tone::Friendly => "Use a warm, friendly, and casual tone while remaining professional.",
        Tone::Empathetic => {
            "Be highly empathetic and understanding, acknowledging the customer's feelings and concerns."
        }
        Tone::Apologetic => {
            "Express sincere apologies for any inconvenience and focus on making things right."
        }
        Tone::Technical => {
            "Use a technical, detailed tone with specific technical information and explanations."
        }
        Tone::Professional => "Maintain a professional, courteous tone.",
    }
}
