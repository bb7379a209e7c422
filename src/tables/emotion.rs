//! Emotion tables: lost emotion (`LE`) and emotional aftereffects (`ES*`)

use super::DiceTable;

const NO_EFFECT: &str = "No effect.";

/// Lost emotion table, rolled on 1D6
pub const LOST_EMOTION: DiceTable = DiceTable {
    key: "LE",
    name: "Lost emotion table",
    dice: 1,
    entries: &[
        "Joy: joy is gone. What did being happy even feel like?",
        "Anger: the fury is gone, and the hatred has faded away with it.",
        "Sorrow: however painful things get, no sadness comes. The tears seem to have run dry.",
        "Pleasure: nothing is fun anymore. Holding on to hope is pointless.",
        "Love: love is an illusion... powerless, fleeting, useless nonsense.",
        "Wonder: nothing moves you anymore. Your heart is frozen.",
    ],
};

/// Aftereffect tables share one layout on 2D6:
/// 2-3, 4, 5, 6-7 are aftereffects, 8-9 nothing, 10-12 heal one.
macro_rules! aftereffect_table {
    ($key:literal, $name:literal, $a:literal, $b:literal, $c:literal, $d:literal, $heal:literal) => {
        DiceTable {
            key: $key,
            name: $name,
            dice: 2,
            entries: &[
                $a, $a, $b, $c, $d, $d, NO_EFFECT, NO_EFFECT, $heal, $heal, $heal,
            ],
        }
    };
}

pub const JOY_AFTEREFFECT: DiceTable = aftereffect_table!(
    "ESH",
    "Joy aftereffect table",
    "Craves joy every day.",
    "Happy moments never last long.",
    "Sometimes cannot honestly share in someone's joy.",
    "Feels great joy over small things.",
    "You may remove one Joy aftereffect."
);

pub const ANGER_AFTEREFFECT: DiceTable = aftereffect_table!(
    "ESA",
    "Anger aftereffect table",
    "Always in a bad mood.",
    "Once angry, takes a long time to calm down.",
    "Quick to anger.",
    "Gets angry far more violently.",
    "You may remove one Anger aftereffect."
);

pub const SORROW_AFTEREFFECT: DiceTable = aftereffect_table!(
    "ESS",
    "Sorrow aftereffect table",
    "Once the tears start, they hardly stop.",
    "Wakes at night remembering sad things.",
    "Suddenly overcome by sadness.",
    "Easily moved to tears.",
    "You may remove one Sorrow aftereffect."
);

pub const PLEASURE_AFTEREFFECT: DiceTable = aftereffect_table!(
    "ESP",
    "Pleasure aftereffect table",
    "Turns cheerful out of nowhere or bursts out laughing.",
    "Grows uneasy when the people around are not having fun.",
    "Restless without something fun going on.",
    "Laughs even at trivial things.",
    "You may remove one Pleasure aftereffect."
);

pub const LOVE_AFTEREFFECT: DiceTable = aftereffect_table!(
    "ESL",
    "Love aftereffect table",
    "Seeks love from anyone who catches their interest.",
    "Cannot bear to leave a loved one (lover, family, pet or fantasy).",
    "Ends up being kind to anyone at all.",
    "Feels uneasy when alone.",
    "You may remove one Love aftereffect."
);

pub const WONDER_AFTEREFFECT: DiceTable = aftereffect_table!(
    "ESE",
    "Wonder aftereffect table",
    "Distrusts anyone who cannot share the feeling of wonder.",
    "Tears come at once, happy or sad.",
    "Reactions become exaggerated.",
    "Deeply moved by the smallest things.",
    "You may remove one Wonder aftereffect."
);
