//! Canned per-profession routine templates.
//!
//! Hand-authored defaults keyed by profession label. Lookup is
//! case-insensitive; unknown professions have no template.

/// A template row: clock label and activity text.
pub type TemplateEntry = (&'static str, &'static str);

const SOFTWARE_ENGINEER: &[TemplateEntry] = &[
    ("7:00 AM", "Wake up and morning routine"),
    ("7:30 AM", "Quick exercise or stretching"),
    ("8:00 AM", "Breakfast and check emails"),
    ("9:00 AM", "Start focused coding work"),
    ("12:00 PM", "Lunch break"),
    ("1:00 PM", "Team meetings and collaboration"),
    ("3:00 PM", "Continue development work"),
    ("6:00 PM", "Wrap up work day"),
    ("6:30 PM", "Dinner and relaxation"),
    ("8:00 PM", "Personal projects or learning"),
    ("10:00 PM", "Wind down and prepare for bed"),
    ("11:00 PM", "Sleep"),
];

const STUDENT: &[TemplateEntry] = &[
    ("6:30 AM", "Wake up and morning routine"),
    ("7:00 AM", "Breakfast and review day's schedule"),
    ("8:00 AM", "Classes or study session"),
    ("12:00 PM", "Lunch break"),
    ("1:00 PM", "Afternoon classes or study"),
    ("4:00 PM", "Extracurricular activities"),
    ("6:00 PM", "Dinner"),
    ("7:00 PM", "Homework and assignments"),
    ("9:00 PM", "Review material and prepare for tomorrow"),
    ("10:00 PM", "Personal time and relaxation"),
    ("11:00 PM", "Sleep"),
];

const BUSINESS_PROFESSIONAL: &[TemplateEntry] = &[
    ("5:30 AM", "Wake up and morning exercise"),
    ("6:30 AM", "Shower and get ready"),
    ("7:00 AM", "Breakfast and news review"),
    ("8:00 AM", "Commute to work"),
    ("9:00 AM", "Check emails and plan day"),
    ("10:00 AM", "Meetings and calls"),
    ("12:00 PM", "Lunch and networking"),
    ("1:00 PM", "Focused work time"),
    ("3:00 PM", "Team management and collaboration"),
    ("5:00 PM", "Wrap up and plan next day"),
    ("6:00 PM", "Commute home"),
    ("7:00 PM", "Dinner and family time"),
    ("9:00 PM", "Personal development or relaxation"),
    ("10:30 PM", "Sleep"),
];

const HEALTHCARE_WORKER: &[TemplateEntry] = &[
    ("5:00 AM", "Wake up and get ready"),
    ("5:30 AM", "Quick breakfast"),
    ("6:00 AM", "Commute to hospital/clinic"),
    ("7:00 AM", "Shift handover"),
    ("7:30 AM", "Patient rounds/appointments"),
    ("12:00 PM", "Quick lunch break"),
    ("12:30 PM", "Continue patient care"),
    ("4:00 PM", "Documentation and handover"),
    ("5:00 PM", "End shift and commute home"),
    ("6:00 PM", "Dinner and relaxation"),
    ("8:00 PM", "Self-care and unwinding"),
    ("9:30 PM", "Sleep"),
];

const CREATIVE_PROFESSIONAL: &[TemplateEntry] = &[
    ("7:30 AM", "Wake up and morning routine"),
    ("8:00 AM", "Breakfast and inspiration gathering"),
    ("9:00 AM", "Creative work - most productive hours"),
    ("12:00 PM", "Lunch break and short walk"),
    ("1:00 PM", "Client meetings or collaborative work"),
    ("3:00 PM", "Continue creative projects"),
    ("6:00 PM", "Wrap up work day"),
    ("6:30 PM", "Dinner"),
    ("7:30 PM", "Explore new ideas or attend events"),
    ("10:00 PM", "Wind down with reading or media"),
    ("11:30 PM", "Sleep"),
];

const CHEF: &[TemplateEntry] = &[
    ("7:00 AM", "Wake up and quick breakfast"),
    ("8:00 AM", "Menu planning and review"),
    ("9:00 AM", "Arrive at restaurant/kitchen"),
    ("9:30 AM", "Prep work and staff coordination"),
    ("11:00 AM", "Pre-service meeting"),
    ("11:30 AM", "Lunch service begins"),
    ("3:00 PM", "Break between services"),
    ("4:00 PM", "Dinner prep and staff management"),
    ("5:00 PM", "Dinner service begins"),
    ("10:00 PM", "Service ends, kitchen cleanup"),
    ("11:00 PM", "Review day and plan tomorrow"),
    ("12:00 AM", "Return home and unwind"),
    ("1:00 AM", "Sleep"),
];

/// Canonical profession labels, in selector order.
pub const PROFESSIONS: &[&str] = &[
    "Software Engineer",
    "Student",
    "Business Professional",
    "Healthcare Worker",
    "Creative Professional",
    "Chef",
];

/// Look up the canned timeline for a profession label, case-insensitively.
pub fn template_for(profession: &str) -> Option<&'static [TemplateEntry]> {
    match profession.trim().to_lowercase().as_str() {
        "software engineer" => Some(SOFTWARE_ENGINEER),
        "student" => Some(STUDENT),
        "business professional" => Some(BUSINESS_PROFESSIONAL),
        "healthcare worker" => Some(HEALTHCARE_WORKER),
        "creative professional" => Some(CREATIVE_PROFESSIONAL),
        "chef" => Some(CHEF),
        _ => None,
    }
}

/// Render a template as prompt text, one `- {time}: {activity}` line per
/// entry. This is the literal text spliced into profession prompts.
pub fn render_prompt_template(profession: &str) -> Option<String> {
    template_for(profession).map(|entries| {
        entries
            .iter()
            .map(|(time, activity)| format!("- {time}: {activity}"))
            .collect::<Vec<_>>()
            .join("\n")
    })
}
