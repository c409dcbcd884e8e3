/// Live chat rooms listed on the community tab.
pub const CHAT_ROOMS: &[&str] = &[
    "Daily Check-in",
    "Anxiety Support Circle",
    "Mindful Mornings",
    "Night Owls",
];

/// Self-help resources linked from the resources section.
pub const RESOURCES: &[&str] = &[
    "Crisis Hotlines",
    "Guided Meditations",
    "Self-Assessment Tools",
    "Workbooks & Worksheets",
];

pub fn is_chat_room(name: &str) -> bool {
    CHAT_ROOMS.contains(&name)
}

pub fn is_resource(name: &str) -> bool {
    RESOURCES.contains(&name)
}
