use crate::types::Measurement;
use std::fmt;

/// Text report formatter for a measurement
pub struct TextReport<'a> {
    measurement: &'a Measurement,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(measurement: &'a Measurement) -> Self {
        Self { measurement }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.measurement;
        writeln!(f, "Cobb Angle Measurement")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(f, "UID:            {}", m.uid)?;
        writeln!(f, "Tool:           {} ({})", m.tool_name, m.value_type)?;
        writeln!(
            f,
            "Label:          {}",
            m.label.as_deref().unwrap_or("none")
        )?;
        writeln!(f, "Study:          {}", m.reference_study_uid)?;
        writeln!(f, "Series:         {}", m.reference_series_uid)?;
        writeln!(
            f,
            "SOP Instance:   {}",
            m.sop_instance_uid.as_deref().unwrap_or("unknown")
        )?;
        writeln!(f, "Display Set:    {}", m.display_set_instance_uid)?;
        writeln!(f, "Frame:          {}", m.frame_number)?;
        writeln!(
            f,
            "Frame of Ref:   {}",
            m.frame_of_reference_uid.as_deref().unwrap_or("unknown")
        )?;
        writeln!(f, "Locked:         {}", m.is_locked)?;
        writeln!(f, "Visible:        {}", m.is_visible)?;
        writeln!(f, "Primary:        {}", m.display_text.primary.join(", "))?;
        writeln!(f, "Secondary:      {}", m.display_text.secondary.join(", "))?;
        writeln!(f)?;

        writeln!(f, "Report")?;
        writeln!(f, "------")?;
        for (column, value) in m.build_report().entries() {
            writeln!(f, "{}: {}", column, value)?;
        }

        Ok(())
    }
}
