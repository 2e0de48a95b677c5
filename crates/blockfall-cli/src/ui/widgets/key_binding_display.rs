use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys that trigger an action, and the action's description.
pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);

/// A single centered line such as `←/a Left | →/d Right`.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self { bindings }
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans = vec![];
        for (i, (keys, description)) in self.bindings.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            let keys = keys.iter().copied().enumerate().flat_map(|(i, key)| {
                let separator = (i > 0).then(|| Span::styled("/", SEPARATOR_STYLE));
                separator.into_iter().chain([Span::styled(key, KEY_STYLE)])
            });
            spans.extend(keys);
            spans.push(Span::raw(" "));
            spans.push(Span::styled(description, DESCRIPTION_STYLE));
        }
        Line::from(spans).centered()
    }
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.to_line().render(area, buf);
    }
}
