//! Static outage safety reference.

/// A titled group of safety tips.
#[derive(Debug, Clone, Copy)]
pub struct TipSection {
    pub title: &'static str,
    pub tips: &'static [&'static str],
}

pub const TIPS: &[TipSection] = &[
    TipSection {
        title: "Before an Outage",
        tips: &[
            "Create an emergency kit with flashlights, batteries, and first aid supplies",
            "Keep a supply of non-perishable food and bottled water",
            "Maintain a list of emergency contacts and important phone numbers",
            "Consider purchasing a backup power generator if you live in a high-risk area",
            "Sign up for emergency alerts from your local utility company",
        ],
    },
    TipSection {
        title: "During an Outage",
        tips: &[
            "Use flashlights instead of candles to reduce fire risk",
            "Keep refrigerator and freezer doors closed to maintain temperature",
            "Unplug sensitive electronics to protect from power surges when electricity returns",
            "Use power banks to keep essential devices charged",
            "Stay informed about restoration efforts through battery-powered radios or mobile devices",
        ],
    },
    TipSection {
        title: "Protecting Electronics",
        tips: &[
            "Use surge protectors for valuable electronics",
            "Turn off and unplug sensitive equipment",
            "Consider using a UPS (Uninterruptible Power Supply) for computers",
            "Keep battery packs fully charged when severe weather is forecast",
            "Back up important data regularly to cloud storage",
        ],
    },
    TipSection {
        title: "Communication",
        tips: &[
            "Keep at least one corded phone that doesn't require electricity",
            "Conserve mobile phone battery by reducing screen brightness",
            "Use text messages instead of calls (they use less battery and bandwidth)",
            "Consider a hand-crank or solar charger for emergency use",
            "Keep car chargers available for mobile devices",
        ],
    },
    TipSection {
        title: "Food Safety",
        tips: &[
            "Keep refrigerator doors closed (food stays cold for about 4 hours)",
            "Freezers maintain temperature for about 48 hours if full and unopened",
            "Use a food thermometer to check items - discard anything above 40°F (4°C)",
            "Have coolers and ice ready to preserve important items",
            "Consume perishable items first before they spoil",
        ],
    },
    TipSection {
        title: "Water Safety",
        tips: &[
            "Store at least one gallon of water per person per day for several days",
            "If water supply is affected, use bottled water for drinking and cooking",
            "Know how to manually operate well pumps if applicable",
            "Fill bathtubs before a major storm for non-potable water reserves",
            "Have water purification tablets or filters available",
        ],
    },
    TipSection {
        title: "Medical Needs",
        tips: &[
            "Keep a backup supply of critical medications",
            "Have a plan for medical devices that require electricity",
            "Know the location of nearest medical facilities with backup power",
            "Consider registering with utility companies if you have critical medical equipment",
            "Maintain an up-to-date list of medications and medical contacts",
        ],
    },
    TipSection {
        title: "Important Contacts",
        tips: &[
            "Local Utility Emergency: Check your utility company website",
            "Emergency Services: 911",
            "FEMA: 1-800-621-3362",
            "American Red Cross: 1-800-733-2767",
            "National Weather Service: weather.gov",
        ],
    },
];
