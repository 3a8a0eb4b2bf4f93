//! Pure view computation: what every bound element should look like for a given
//! preference snapshot. The DOM adapter in `app` only applies the result.

use crate::models::{Binding, PreferenceSet};

/// A preference button as read from the page.
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonSpec {
    pub binding: Binding,
    pub label_active: Option<String>,
    pub label_inactive: Option<String>,
    pub has_card: bool,
}

impl ButtonSpec {
    pub fn new(binding: Binding) -> Self {
        Self {
            binding,
            label_active: None,
            label_inactive: None,
            has_card: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonPatch {
    pub index: usize,
    pub active: bool,
    /// `Some` only when the card exists; it mirrors `active`.
    pub card_selected: Option<bool>,
    pub label: Option<String>,
}

pub fn render(prefs: &PreferenceSet, buttons: &[ButtonSpec]) -> Vec<ButtonPatch> {
    buttons
        .iter()
        .enumerate()
        .map(|(index, button)| {
            let active = prefs.is_preferred(&button.binding);
            let label = if active {
                button.label_active.clone()
            } else {
                button.label_inactive.clone()
            };
            ButtonPatch {
                index,
                active,
                card_selected: if button.has_card { Some(active) } else { None },
                label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_reflects_every_binding_kind() {
        let mut prefs = PreferenceSet {
            destination: Some("stl".into()),
            flights: vec!["luke-stl-out".into()],
            ..PreferenceSet::default()
        };
        prefs.flags.insert("hotel".into(), true.into());

        let buttons = vec![
            ButtonSpec::new(Binding::Destination("stl".into())),
            ButtonSpec::new(Binding::Destination("xna".into())),
            ButtonSpec::new(Binding::Flight("luke-stl-out".into())),
            ButtonSpec::new(Binding::Flight("luke-stl-ret".into())),
            ButtonSpec::new(Binding::Flag("hotel".into())),
            ButtonSpec::new(Binding::Flag("car".into())),
        ];
        let active: Vec<bool> = render(&prefs, &buttons).iter().map(|p| p.active).collect();
        assert_eq!(active, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn labels_and_cards_follow_state() {
        let prefs = PreferenceSet {
            flights: vec!["luke-stl-out".into()],
            ..PreferenceSet::default()
        };
        let button = ButtonSpec {
            label_active: Some("Preferred".into()),
            label_inactive: Some("Prefer".into()),
            has_card: true,
            ..ButtonSpec::new(Binding::Flight("luke-stl-out".into()))
        };
        let other = ButtonSpec {
            binding: Binding::Flight("luke-stl-ret".into()),
            ..button.clone()
        };
        let bare = ButtonSpec::new(Binding::Flag("x".into()));

        let patches = render(&prefs, &[button, other, bare]);
        assert_eq!(patches[0].label.as_deref(), Some("Preferred"));
        assert_eq!(patches[0].card_selected, Some(true));
        assert_eq!(patches[1].label.as_deref(), Some("Prefer"));
        assert_eq!(patches[1].card_selected, Some(false));
        assert_eq!(patches[2].label, None);
        assert_eq!(patches[2].card_selected, None);
        assert_eq!(patches[2].index, 2);
    }
}
