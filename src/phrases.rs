//! Fixed spoken phrases
//!
//! Responses mix Hindi and English: confirmations for navigation actions are
//! English, identity and inference fallbacks are Hindi. Handlers format the
//! templated ones with `format!`.

/// Spoken once when the interactive loop starts
pub const GREETING: &str = "नमस्ते।";

/// Fixed self-introduction for the Identity intent
pub const IDENTITY: &str = "नमस्ते। मेरा नाम वाणी है। मैं एक एआई असिस्टेंट हूं।";

/// Fallback for commands that match no rule
pub const UNRECOGNIZED: &str = "मैं आपकी बात समझ नहीं पाया। कृपया दोबारा कहें।";

/// Spoken by the Exit handler before the loop stops
pub const FAREWELL: &str = "अलविदा।";

/// Inference returned a well-formed body without an answer
pub const NO_ANSWER: &str = "माफ़ कीजिए, मुझे कोई जवाब नहीं मिला।";

/// Inference service connection refused
pub const SERVER_DOWN: &str =
    "कृपया सुनिश्चित करें कि Ollama सर्वर localhost:11434 पर चालू है।";

/// Any other inference failure
pub const INFERENCE_APOLOGY: &str = "माफ़ कीजिए, जवाब लाने में कोई समस्या आई है।";

/// "ollama" with no question after it
pub const ASK_A_QUESTION: &str = "Please provide a question after 'ollama'";

/// Media command with no query
pub const WHAT_TO_PLAY: &str = "What would you like me to play?";

/// Site could not be opened
pub const OPEN_APOLOGY: &str = "Sorry, I couldn't open the website";

/// Search could not be performed
pub const SEARCH_APOLOGY: &str = "Sorry, I couldn't perform the search";

/// Media playback via the automation session failed
pub const PLAY_APOLOGY: &str = "Sorry, I couldn't play the video";

/// Outer-loop catch-all
pub const LOOP_APOLOGY: &str = "Sorry, an error occurred. Please try again.";
