//! Groundwater extraction permits and regulations.

use gwp_common::{Coordinate, GwpClass};
use gwp_protocol::analysis::{AuthorityContacts, ComplianceResponse, Regulation};

fn regulation(authority: &str, status: &str, text: &str, severity: &str) -> Regulation {
    Regulation {
        authority: authority.to_string(),
        status: status.to_string(),
        regulation: text.to_string(),
        severity: severity.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn compliance_check(location: Coordinate, class: GwpClass) -> ComplianceResponse {
    let mut regulations = Vec::new();
    let mut permits = Vec::new();
    let mut restrictions = Vec::new();

    match class {
        GwpClass::Low => {
            regulations.push(regulation(
                "CGWA",
                "Critical",
                "Borewell drilling requires CGWA approval",
                "High",
            ));
            permits.push("CGWA NOC (No Objection Certificate)");
            restrictions.push("Maximum depth restriction: 200 ft");
            restrictions.push("Mandatory water meter installation");
        }
        GwpClass::Moderate => {
            regulations.push(regulation(
                "CGWA",
                "Semi-Critical",
                "Registration required with State Ground Water Department",
                "Medium",
            ));
            permits.push("State Ground Water Board Registration");
        }
        GwpClass::High => {
            regulations.push(regulation(
                "CGWA",
                "Safe",
                "Standard borewell guidelines apply",
                "Low",
            ));
        }
    }

    permits.extend([
        "Gram Panchayat Permission",
        "Revenue Department Land Records",
        "Electricity Connection (if pump > 5 HP)",
    ]);
    regulations.push(regulation(
        "Karnataka State Pollution Control Board",
        "Required",
        "Consent for borewell >100ft depth",
        "Low",
    ));
    restrictions.extend([
        "Minimum 100m distance from existing borewells",
        "Minimum 30m from septic tanks",
        "Minimum 15m from property boundary",
    ]);

    let score = 100 - class.pick(0, 20, 40);
    let status = if score >= 80 {
        "Compliant"
    } else if score >= 60 {
        "Needs Attention"
    } else {
        "High Restrictions"
    };

    ComplianceResponse {
        location,
        gwp_class: class,
        compliance_score: score,
        compliance_status: status.to_string(),
        regulations,
        permits_required: strings(&permits),
        restrictions: strings(&restrictions),
        documents_needed: strings(&[
            "Land ownership documents (7/12 extract, property card)",
            "Identity proof (Aadhar, PAN)",
            "Site plan/layout",
            "Hydrogeological report (for >200ft depth)",
            "Rainfall recharge structure proposal",
        ]),
        processing_time: class.pick("7-15 days", "15-30 days", "30-90 days").to_string(),
        estimated_fees: class
            .pick("₹500-₹3,000", "₹2,000-₹8,000", "₹5,000-₹15,000")
            .to_string(),
        contact_info: AuthorityContacts {
            cgwa_office: "CGWA Southern Region, Bangalore".to_string(),
            state_office: "Karnataka Ground Water Department, Dharwad".to_string(),
            helpline: "080-22867828".to_string(),
            website: "cgwb.gov.in".to_string(),
        },
        recommendations: strings(&[
            "Consult licensed hydrogeologist before drilling",
            "Install rainwater harvesting system (mandatory in some areas)",
            "Maintain borewell log book",
            "Regular water quality testing recommended",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_class_is_restricted() {
        let resp = compliance_check(Coordinate::new(15.45, 75.0), GwpClass::Low);
        assert_eq!(resp.compliance_score, 60);
        assert_eq!(resp.compliance_status, "Needs Attention");
        assert_eq!(resp.permits_required[0], "CGWA NOC (No Objection Certificate)");
        assert_eq!(resp.permits_required.len(), 4);
        assert_eq!(resp.restrictions.len(), 5);
        assert_eq!(resp.regulations.len(), 2);
        assert_eq!(resp.processing_time, "30-90 days");
    }

    #[test]
    fn test_high_class_is_compliant() {
        let resp = compliance_check(Coordinate::new(15.45, 75.0), GwpClass::High);
        assert_eq!(resp.compliance_score, 100);
        assert_eq!(resp.compliance_status, "Compliant");
        assert_eq!(resp.permits_required.len(), 3);
        assert_eq!(resp.regulations[0].status, "Safe");
        assert_eq!(resp.estimated_fees, "₹500-₹3,000");
    }

    #[test]
    fn test_moderate_class() {
        let resp = compliance_check(Coordinate::new(15.45, 75.0), GwpClass::Moderate);
        assert_eq!(resp.compliance_score, 80);
        assert_eq!(resp.compliance_status, "Compliant");
        assert_eq!(resp.regulations[0].severity, "Medium");
    }
}
