//! Field type vocabulary
//!
//! Maps the internal field typenames of the form designer to display labels.
//! Unknown typenames are never dropped; they pass through untranslated.

/// Structural wrapper types that hold other fields but carry no value of their
/// own. They are left out of the field inventory; their children are not.
pub const EXCLUDED_TYPENAMES: &[&str] = &[
    "ElementRoot",
    "ElementSection",
    "ElementPage",
    "ElementRow",
    "ElementColumns",
    "ElementColumn",
    "ElementTabs",
    "ElementTab",
    "ElementContainer",
    "ElementSpacer",
];

/// Whether a raw typename is a structural wrapper
pub fn is_excluded(typename: &str) -> bool {
    EXCLUDED_TYPENAMES.contains(&typename)
}

/// Display label for a known typename
pub fn label_for(typename: &str) -> Option<&'static str> {
    let label = match typename {
        "ElementGroup" => "Group",
        "ElementTextfield" => "Text field",
        "ElementTextarea" => "Text area",
        "ElementNumber" => "Number field",
        "ElementDecimal" => "Decimal field",
        "ElementAmount" => "Amount field",
        "ElementMultiSelect" => "Multi-select",
        "ElementDropdown" => "Dropdown",
        "ElementRadio" => "Radio buttons",
        "ElementPerson" => "Person field",
        "ElementDate" => "Date field",
        "ElementDateInterval" => "Date interval",
        "ElementInfoText" => "Information text",
        "ElementYesNo" => "Yes/no field",
        "ElementCheckBox" => "Checkbox",
        "ElementList" => "List",
        "ElementTable" => "Table",
        "ElementRepeater" => "Repeating group",
        "ElementVaerdiliste" => "Value list",
        "ElementAutonummerering" => "Auto-numbering field",
        "ElementFacit" => "Result field",
        "ElementBeregning" => "Calculation field",
        "ElementAvanceretSammenligning" => "Comparison field",
        "ElementBruger" => "User picker",
        "ElementGruppeVaelger" => "Group picker",
        "ElementOrganisation" => "Organisation picker",
        "ElementCPROpslag" => "CPR lookup",
        "ElementCVROpslag" => "CVR lookup",
        "ElementSamtykke" => "Consent field",
        "ElementPhone" => "Phone field",
        "ElementEmail" => "Email field",
        "ElementUnderskrift" => "Signature field",
        "ElementAdresse" => "Address field",
        "ElementAfstand" => "Distance field",
        "ElementGisKort" => "GIS map",
        "ElementMatrikel" => "Cadastre picker",
        "ElementBooking" => "Booking element",
        "ElementDagTimeAntal" => "Days and hours",
        "ElementDagAntal" => "Day count",
        "ElementTime" => "Time of day",
        "ElementPosteringSumAar" => "User posting list",
        "ElementTimeAntal" => "Hour count",
        "ElementTimedagpenge" => "Hourly allowance",
        "ElementKoersel" => "Mileage log",
        "ElementHeadline" => "Headline",
        "ElementStandardTekst" => "Standard text",
        "ElementUniktId" => "Unique ID field",
        "ElementImageCrop" => "Image field",
        "ElementUpload" => "File upload field",
        "ElementHelpDocument" => "Help document",
        "ElementLink" => "Link field",
        "ElementQRCode" => "QR code",
        "ElementVideo" => "Video field",
        "ElementFirma" => "Company details",
        "ElementAPI" => "API field",
        "ElementBetaling" => "Payment field",
        "ElementSkjult" => "Hidden field",
        "ElementBetinget" => "Conditional text",
        _ => return None,
    };
    Some(label)
}

/// Translate a typename, falling back to the typename itself
pub fn translate(typename: &str) -> &str {
    label_for(typename).unwrap_or(typename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_typename_is_translated() {
        assert_eq!(translate("ElementDate"), "Date field");
        assert_eq!(translate("ElementCPROpslag"), "CPR lookup");
    }

    #[test]
    fn test_unknown_typename_passes_through() {
        assert_eq!(translate("ElementFancyNew"), "ElementFancyNew");
        assert_eq!(translate(""), "");
    }

    #[test]
    fn test_wrappers_are_excluded_but_groups_are_not() {
        assert!(is_excluded("ElementSection"));
        assert!(is_excluded("ElementColumns"));
        assert!(!is_excluded("ElementGroup"));
        assert!(!is_excluded("ElementTextfield"));
    }

    #[test]
    fn test_excluded_types_have_no_label() {
        for typename in EXCLUDED_TYPENAMES {
            assert!(label_for(typename).is_none(), "{typename} should not be labelled");
        }
    }
}
