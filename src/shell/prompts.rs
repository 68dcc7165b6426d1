pub const DEFAULT_ANALYSIS_PROMPT: &str = "You are a nutrition expert. Your task is to analyze the provided food details, \
identify nutritional values, and calculate the total caloric intake. Additionally, provide a detailed \
breakdown of each food item along with its respective calorie content, determine whether the food is \
healthy or not, and mention the percentage split of protein, fat, carbohydrates, and fiber in the diet. \
Finally, provide a conclusion summarizing the overall nutritional quality of the meal.";

pub const TIPS_PROMPT: &str =
    "Provide a short nutritional tip that promotes a healthy and balanced diet.";

pub const MISSING_INPUT_MESSAGE: &str =
    "Please provide a description of your meal or upload an image 📷";

pub const FEEDBACK_ACKNOWLEDGEMENT: &str = "Thank you for your feedback! 😊";
