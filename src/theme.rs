use ggez::graphics::Color;
use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Neon,
    Retro,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Dark, Theme::Neon, Theme::Retro];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
            Theme::Neon => "neon",
            Theme::Retro => "retro",
        }
    }

    pub fn from_name(name: &str) -> Option<Theme> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(name))
    }

    pub fn next(&self) -> Theme {
        match self {
            Theme::Default => Theme::Dark,
            Theme::Dark => Theme::Neon,
            Theme::Neon => Theme::Retro,
            Theme::Retro => Theme::Default,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Default => Palette {
                background: Color::from_rgb(240, 244, 232),
                grid: Color::from_rgb(214, 222, 204),
                snake: Color::from_rgb(76, 175, 80),
                snake_border: Color::from_rgb(46, 125, 50),
                eyes: Color::BLACK,
                food: Color::from_rgb(244, 67, 54),
                food_border: Color::from_rgb(183, 28, 28),
                special_food: Color::from_rgb(255, 193, 7),
                text: Color::from_rgb(33, 33, 33),
                overlay: Color::new(1.0, 1.0, 1.0, 0.8),
            },
            Theme::Dark => Palette {
                background: Color::new(0.1, 0.1, 0.15, 1.0),
                grid: Color::new(0.15, 0.15, 0.2, 1.0),
                snake: Color::from_rgb(102, 187, 106),
                snake_border: Color::from_rgb(27, 94, 32),
                eyes: Color::BLACK,
                food: Color::from_rgb(239, 83, 80),
                food_border: Color::from_rgb(198, 40, 40),
                special_food: Color::from_rgb(255, 213, 79),
                text: Color::WHITE,
                overlay: Color::new(0.0, 0.0, 0.0, 0.75),
            },
            Theme::Neon => Palette {
                background: Color::from_rgb(10, 0, 20),
                grid: Color::from_rgb(40, 10, 60),
                snake: Color::from_rgb(0, 255, 170),
                snake_border: Color::from_rgb(0, 160, 255),
                eyes: Color::from_rgb(10, 0, 20),
                food: Color::from_rgb(255, 0, 200),
                food_border: Color::from_rgb(255, 120, 240),
                special_food: Color::from_rgb(255, 255, 0),
                text: Color::from_rgb(0, 255, 170),
                overlay: Color::new(0.04, 0.0, 0.08, 0.8),
            },
            Theme::Retro => Palette {
                background: Color::from_rgb(155, 188, 15),
                grid: Color::from_rgb(139, 172, 15),
                snake: Color::from_rgb(48, 98, 48),
                snake_border: Color::from_rgb(15, 56, 15),
                eyes: Color::from_rgb(155, 188, 15),
                food: Color::from_rgb(15, 56, 15),
                food_border: Color::from_rgb(48, 98, 48),
                special_food: Color::from_rgb(48, 98, 48),
                text: Color::from_rgb(15, 56, 15),
                overlay: Color::new(0.6, 0.74, 0.06, 0.85),
            },
        }
    }
}

pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub snake: Color,
    pub snake_border: Color,
    pub eyes: Color,
    pub food: Color,
    pub food_border: Color,
    pub special_food: Color,
    pub text: Color,
    pub overlay: Color,
}
