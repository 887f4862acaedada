// Console wording for the swap session

pub const NUM1_PROMPT: &str = "Enter the value for num1 (int): ";
pub const NUM2_PROMPT: &str = "Enter the value for num2 (int): ";
pub const REPEAT_PROMPT: &str = "Do you want to repeat the program? (y/n): ";

pub const BEFORE_SWAP: &str = "Before swap (integers)";
pub const AFTER_SWAP: &str = "After swap (integers)";

pub const INPUT_ERROR_MESSAGE: &str = "Invalid input. Please enter a valid value.";
pub const CHAR_INPUT_ERROR_MESSAGE: &str = "Invalid input. Please enter 'y' or 'n'.";

/// Name of the frame holding the two value slots
pub const FRAME_NAME: &str = "main";
