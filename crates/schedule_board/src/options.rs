use schedule_environment::StaffId;
use schedule_grid::grouping::DuplicatePolicy;
use serde::Deserialize;
use serde::Serialize;

use crate::BoardError;

/// How a page wants its week board built.
///
/// The manager page uses the defaults. The personal schedule page sets
/// `staff_filter` to the signed-in staff member.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardOptions
{
    pub duplicate_policy: DuplicatePolicy,
    pub include_inactive_shifts: bool,
    pub staff_filter: Option<StaffId>,
}

impl BoardOptions
{
    pub fn from_json(json: &str) -> Result<Self, BoardError>
    {
        serde_json::from_str(json).map_err(|e| BoardError::InvalidOptions(e.to_string()))
    }

    pub fn for_staff(staff_id: StaffId) -> Self
    {
        Self {
            staff_filter: Some(staff_id),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests
{
    use schedule_grid::grouping::DuplicatePolicy;

    use super::BoardOptions;
    use crate::BoardError;

    #[test]
    fn test_empty_object_gives_defaults()
    {
        assert_eq!(BoardOptions::from_json("{}").unwrap(), BoardOptions::default());
    }

    #[test]
    fn test_full_options()
    {
        let options = BoardOptions::from_json(r#"{"duplicatePolicy": "reject", "includeInactiveShifts": true, "staffFilter": 7}"#).unwrap();

        assert_eq!(options.duplicate_policy, DuplicatePolicy::Reject);
        assert!(options.include_inactive_shifts);
        assert_eq!(options.staff_filter, Some(7));
    }

    #[test]
    fn test_unknown_policy_is_rejected()
    {
        assert!(matches!(
            BoardOptions::from_json(r#"{"duplicatePolicy": "sometimes"}"#),
            Err(BoardError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_for_staff()
    {
        let options = BoardOptions::for_staff(3);

        assert_eq!(options.staff_filter, Some(3));
        assert_eq!(options.duplicate_policy, DuplicatePolicy::Allow);
    }
}
