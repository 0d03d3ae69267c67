// Domain constants (no magic values)

use super::label::SenseKind;

/// Characters a feature text must not contain
pub const FORBIDDEN_FEATURE_CHARS: [char; 6] = ['.', '#', '$', '/', '[', ']'];

/// Backend id prefix for senses sourced from the dictionary
pub const DICTIONARY_BACKEND_PREFIX: &str = "wordnet:";

/// Backend id prefix for annotator-created senses
pub const VIRTUAL_BACKEND_PREFIX: &str = "new:";

/// Backend id prefix for the literal half of a split pair
pub const SPLIT_LITERAL_PREFIX: &str = "A_";

/// Backend id prefix for the metaphorical half of a split pair
pub const SPLIT_METAPHORICAL_PREFIX: &str = "B_";

/// Display id suffix for the literal half of a split pair
pub const SPLIT_LITERAL_SUFFIX: &str = "A";

/// Display id suffix for the metaphorical half of a split pair
pub const SPLIT_METAPHORICAL_SUFFIX: &str = "B";

/// Suffix appended to the id of a modified feature in the effective view
pub const MODIFIED_FEATURE_SUFFIX: &str = "(M)";

/// Labels selectable on a dictionary sense
pub const DICTIONARY_LABEL_OPTIONS: [SenseKind; 3] =
    [SenseKind::Literal, SenseKind::Related, SenseKind::Metaphorical];

/// Labels selectable on the literal half of a split pair
pub const SPLIT_LITERAL_LABEL_OPTIONS: [SenseKind; 2] = [SenseKind::Literal, SenseKind::Related];

/// Labels selectable on the metaphorical half of a split pair
pub const SPLIT_METAPHORICAL_LABEL_OPTIONS: [SenseKind; 1] = [SenseKind::Metaphorical];

/// Labels selectable on a virtual sense
pub const VIRTUAL_LABEL_OPTIONS: [SenseKind; 1] = [SenseKind::Related];
