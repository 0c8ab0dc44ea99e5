//! The built-in demo story, "The Lantern Road".
//!
//! A small story that exercises the engine surface: tags, priorities,
//! frequencies, display order, conditional visibility, actions, and
//! qualities with every formatting rule the CLI renders.

use rand::Rng;

use strand_core::{
    ActionResponse, Character, CoreResult, QualityDefinition, QualityFormat, QualityGroup,
    SimpleSituation, Situation, SituationMeta, Story, System,
};

/// Only visible to a character with courage, and only selectable with a
/// lit lantern in hand.
struct WolfDen;

impl Situation for WolfDen {
    fn meta(&self) -> SituationMeta {
        SituationMeta::new()
            .with_priority(2)
            .with_display_order(3)
            .with_tag("wild")
            .with_choice_label("Approach the wolf den")
    }

    fn can_view(&self, character: &Character, _host: Option<&str>) -> bool {
        character.quality_or_zero("courage") >= 1.0
    }

    fn can_choose(&self, character: &Character, _host: Option<&str>) -> bool {
        character.quality_or_zero("lantern") != 0.0
    }

    fn enter(
        &self,
        character: &mut Character,
        system: &mut dyn System,
        _from: Option<&str>,
    ) -> CoreResult<()> {
        system.write_heading("The Wolf Den");
        system.write(
            "Eyes catch the lantern light. You hold it high and the shapes \
             circle just beyond its reach.",
        );

        let roll = system.rng().random_range(1..=6);
        if roll >= 3 {
            system.write("The pack loses interest and melts into the trees.");
            system.adjust_quality(character, "luck", 0.5);
        } else {
            system.write("A grey shape darts in and snaps before you drive it back.");
            system.adjust_quality(character, "health", -2.0);
        }

        let ids = system.choose(character, &["roadside".to_string()], None, None)?;
        system.write_choices(character, &ids)?;
        Ok(())
    }
}

/// Build the demo story.
pub fn build() -> Story {
    let mut story = Story::new("roadside");

    story.define_group("stats", QualityGroup::new("Statistics", 0));
    story.define_group("gear", QualityGroup::new("Gear", 1));
    story.define_quality(
        "health",
        QualityDefinition::new("Health", QualityFormat::Integer).with_group("stats"),
    );
    story.define_quality(
        "courage",
        QualityDefinition::new("Courage", QualityFormat::fudge_adjectives()).with_group("stats"),
    );
    story.define_quality(
        "luck",
        QualityDefinition::new("Luck", QualityFormat::Numeric).with_group("stats"),
    );
    story.define_quality(
        "lantern",
        QualityDefinition::new("Storm Lantern", QualityFormat::OnOff).with_group("gear"),
    );

    story.set_init(|character, system| {
        system.set_quality(character, "health", 10.0);
        system.set_quality(character, "courage", 0.0);
        Ok(())
    });

    story
        .add_situation(
            "roadside",
            SimpleSituation::new(
                "roadside",
                "Dusk settles over the lantern road. The old milestone leans \
                 at the verge, and beyond the hedgerows the wild country waits.",
            )
            .with_heading("The Lantern Road")
            .with_choice("milestone")
            .with_choice("stall")
            .with_choice("#wild")
            .with_choice_bounds(Some(2), Some(4))
            .with_action(
                "listen",
                ActionResponse::Text(
                    "Wind in the hedgerows, and far off, something that might be howling."
                        .to_string(),
                ),
            )
            .with_action(
                "steady",
                ActionResponse::AdjustQuality {
                    name: "courage".to_string(),
                    delta: 1.0,
                    text: Some("You square your shoulders and breathe.".to_string()),
                },
            )
            .with_meta(SituationMeta::new().with_choice_label("Return to the roadside")),
        )
        .unwrap();

    story
        .add_situation(
            "milestone",
            SimpleSituation::new(
                "milestone",
                "The milestone reads: TWELVE MILES TO HARROWGATE. Someone has \
                 scratched beneath it: turn back at the hollow.",
            )
            .with_choice("roadside")
            .with_choice("stall")
            .with_meta(
                SituationMeta::new()
                    .with_display_order(0)
                    .with_choice_label("Read the milestone"),
            ),
        )
        .unwrap();

    story
        .add_situation(
            "stall",
            SimpleSituation::new(
                "stall",
                "A tinker's stall stands shuttered for the night, but a shelf \
                 of storm lanterns glows behind the lattice.",
            )
            .with_choice("roadside")
            .with_action(
                "buy",
                ActionResponse::AdjustQuality {
                    name: "lantern".to_string(),
                    delta: 1.0,
                    text: Some("You trade a coin for a storm lantern.".to_string()),
                },
            )
            .with_meta(
                SituationMeta::new()
                    .with_display_order(1)
                    .with_choice_label("Visit the tinker's stall"),
            ),
        )
        .unwrap();

    story
        .add_situation(
            "old-orchard",
            SimpleSituation::new(
                "old-orchard",
                "Apple trees gone feral claw at the moon. Windfalls soften \
                 underfoot.",
            )
            .with_choice("roadside")
            .with_meta(
                SituationMeta::new()
                    .with_tag("wild")
                    .with_display_order(2)
                    .with_frequency(2.0)
                    .with_choice_label("Walk the old orchard"),
            ),
        )
        .unwrap();

    story
        .add_situation(
            "dark-hollow",
            SimpleSituation::new(
                "dark-hollow",
                "The road dips into a hollow where the dusk pools like water. \
                 The scratched warning comes back to you.",
            )
            .with_choice("roadside")
            .with_meta(
                SituationMeta::new()
                    .with_tag("wild")
                    .with_display_order(2)
                    .with_frequency(0.5)
                    .with_choice_label("Brave the dark hollow"),
            ),
        )
        .unwrap();

    story.add_situation("wolf-den", WolfDen).unwrap();

    story
}
