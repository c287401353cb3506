use std::collections::HashMap;
use std::sync::OnceLock;

/// Country name to `[longitude, latitude]` of its centroid, for placing
/// guest nationalities on the map. Keys are matched exactly, so common
/// spelling variants are listed as their own entries.
pub static COUNTRY_COORDINATES: &[(&str, [f64; 2])] = &[
    ("Andorra", [1.6016, 42.5462]),
    ("United Arab Emirates", [53.8478, 23.4241]),
    ("Afghanistan", [67.71, 33.9391]),
    ("Antigua and Barbuda", [-61.7964, 17.0608]),
    ("Albania", [20.1683, 41.1533]),
    ("Armenia", [45.0382, 40.0691]),
    ("Angola", [17.8739, -11.2027]),
    ("Argentina", [-63.6167, -38.4161]),
    ("Austria", [14.5501, 47.5162]),
    ("Australia", [133.7751, -25.2744]),
    ("Azerbaijan", [47.5769, 40.1431]),
    ("Bosnia and Herzegovina", [17.6791, 43.9159]),
    ("Barbados", [-59.5432, 13.1939]),
    ("Bangladesh", [90.3563, 23.685]),
    ("Belgium", [4.4699, 50.5039]),
    ("Burkina Faso", [-1.5616, 12.2383]),
    ("Bulgaria", [25.4858, 42.7339]),
    ("Bahrain", [50.6378, 25.9304]),
    ("Burundi", [29.9189, -3.3731]),
    ("Benin", [2.3158, 9.3077]),
    ("Brunei", [114.7277, 4.5353]),
    ("Bolivia", [-63.5887, -16.2902]),
    ("Brazil", [-51.9253, -14.235]),
    ("Bahamas", [-77.3963, 25.0343]),
    ("Bhutan", [90.4336, 27.5142]),
    ("Botswana", [24.6849, -22.3285]),
    ("Belarus", [27.9534, 53.7098]),
    ("Belize", [-88.4976, 17.1899]),
    ("Canada", [-106.3468, 56.1304]),
    ("Democratic Republic of the Congo", [21.7587, -4.0383]),
    ("Central African Republic", [20.9394, 6.6111]),
    ("Republic of the Congo", [15.8277, -0.228]),
    ("Switzerland", [8.2275, 46.8182]),
    ("Ivory Coast", [-5.5471, 7.54]),
    ("Chile", [-71.543, -35.6751]),
    ("Cameroon", [12.3547, 7.3697]),
    ("China", [104.1954, 35.8617]),
    ("Colombia", [-74.2973, 4.5709]),
    ("Costa Rica", [-83.7534, 9.7489]),
    ("Cuba", [-77.7812, 21.5218]),
    ("Cape Verde", [-24.0132, 16.0021]),
    ("Cyprus", [33.4299, 35.1264]),
    ("Czech Republic", [15.473, 49.8175]),
    ("Czechia", [15.473, 49.8175]),
    ("Germany", [10.4515, 51.1657]),
    ("Djibouti", [42.5903, 11.8251]),
    ("Denmark", [9.5018, 56.2639]),
    ("Dominica", [-61.371, 15.415]),
    ("Dominican Republic", [-70.1627, 18.7357]),
    ("Algeria", [1.6596, 28.0339]),
    ("Ecuador", [-78.1834, -1.8312]),
    ("Estonia", [25.0136, 58.5953]),
    ("Egypt", [30.8025, 26.8206]),
    ("Eritrea", [39.7823, 15.1794]),
    ("Spain", [-3.7492, 40.4637]),
    ("Ethiopia", [40.4897, 9.145]),
    ("Finland", [25.7482, 61.9241]),
    ("Fiji", [179.4144, -16.5782]),
    ("France", [2.2137, 46.2276]),
    ("Gabon", [11.6094, -0.8037]),
    ("United Kingdom", [-3.436, 55.3781]),
    ("UK", [-3.436, 55.3781]),
    ("England", [-1.1743, 52.3555]),
    ("Scotland", [-4.2026, 56.4907]),
    ("Wales", [-3.7837, 52.1307]),
    ("Grenada", [-61.6042, 12.2628]),
    ("Georgia", [43.3569, 42.3154]),
    ("Ghana", [-1.0232, 7.9465]),
    ("Gambia", [-15.3101, 13.4432]),
    ("Guinea", [-9.6966, 9.9456]),
    ("Equatorial Guinea", [10.2679, 1.6508]),
    ("Greece", [21.8243, 39.0742]),
    ("Guatemala", [-90.2308, 15.7835]),
    ("Guinea-Bissau", [-15.1804, 11.8037]),
    ("Guyana", [-58.9302, 4.8604]),
    ("Hong Kong", [114.1095, 22.3964]),
    ("Honduras", [-86.2419, 15.2]),
    ("Croatia", [15.2, 45.1]),
    ("Haiti", [-72.2852, 18.9712]),
    ("Hungary", [19.5033, 47.1625]),
    ("Indonesia", [113.9213, -0.7893]),
    ("Ireland", [-8.2439, 53.4129]),
    ("Israel", [34.8516, 31.0461]),
    ("India", [78.9629, 20.5937]),
    ("Iraq", [43.6793, 33.2232]),
    ("Iran", [53.688, 32.4279]),
    ("Iceland", [-19.0208, 64.9631]),
    ("Italy", [12.5674, 41.8719]),
    ("Jamaica", [-77.2975, 18.1096]),
    ("Jordan", [36.2384, 30.5852]),
    ("Japan", [138.2529, 36.2048]),
    ("Kenya", [37.9062, -0.0236]),
    ("Kyrgyzstan", [74.7661, 41.2044]),
    ("Cambodia", [104.991, 12.5657]),
    ("Comoros", [43.8722, -11.875]),
    ("Saint Kitts and Nevis", [-62.783, 17.3578]),
    ("North Korea", [127.5101, 40.3399]),
    ("South Korea", [127.7669, 35.9078]),
    ("Kuwait", [47.4818, 29.3117]),
    ("Kazakhstan", [66.9237, 48.0196]),
    ("Laos", [102.4955, 19.8563]),
    ("Lebanon", [35.8623, 33.8547]),
    ("Saint Lucia", [-60.9789, 13.9094]),
    ("Liechtenstein", [9.5554, 47.166]),
    ("Sri Lanka", [80.7718, 7.8731]),
    ("Liberia", [-9.4295, 6.4281]),
    ("Lesotho", [28.2336, -29.61]),
    ("Lithuania", [23.8813, 55.1694]),
    ("Luxembourg", [6.1296, 49.8153]),
    ("Latvia", [24.6032, 56.8796]),
    ("Libya", [17.2283, 26.3351]),
    ("Morocco", [-7.0926, 31.7917]),
    ("Monaco", [7.4128, 43.7503]),
    ("Moldova", [28.3699, 47.4116]),
    ("Montenegro", [19.3744, 42.7087]),
    ("Madagascar", [46.8691, -18.7669]),
    ("North Macedonia", [21.7453, 41.6086]),
    ("Mali", [-3.9962, 17.5707]),
    ("Myanmar", [95.9562, 21.914]),
    ("Mongolia", [103.8467, 46.8625]),
    ("Mauritania", [-10.9408, 21.0079]),
    ("Malta", [14.3754, 35.9375]),
    ("Mauritius", [57.5522, -20.3484]),
    ("Maldives", [73.2207, 3.2028]),
    ("Malawi", [34.3015, -13.2543]),
    ("Mexico", [-102.5528, 23.6345]),
    ("Malaysia", [101.9758, 4.2105]),
    ("Mozambique", [35.5296, -18.6657]),
    ("Namibia", [18.4904, -22.9576]),
    ("Niger", [8.0817, 17.6078]),
    ("Nigeria", [8.6753, 9.082]),
    ("Nicaragua", [-85.2072, 12.8654]),
    ("Netherlands", [5.2913, 52.1326]),
    ("Norway", [8.4689, 60.472]),
    ("Nepal", [84.124, 28.3949]),
    ("New Zealand", [174.886, -40.9006]),
    ("Oman", [55.9233, 21.5126]),
    ("Panama", [-80.7821, 8.538]),
    ("Peru", [-75.0152, -9.19]),
    ("Papua New Guinea", [143.9555, -6.315]),
    ("Philippines", [121.774, 12.8797]),
    ("Pakistan", [69.3451, 30.3753]),
    ("Poland", [19.1451, 51.9194]),
    ("Portugal", [-8.2245, 39.3999]),
    ("Paraguay", [-58.4438, -23.4425]),
    ("Qatar", [51.1839, 25.3548]),
    ("Romania", [24.9668, 45.9432]),
    ("Serbia", [21.0059, 44.0165]),
    ("Russia", [105.3188, 61.524]),
    ("Rwanda", [29.8739, -1.9403]),
    ("Saudi Arabia", [45.0792, 23.8859]),
    ("Seychelles", [55.492, -4.6796]),
    ("Sudan", [30.2176, 12.8628]),
    ("Sweden", [18.6435, 60.1282]),
    ("Singapore", [103.8198, 1.3521]),
    ("Slovenia", [14.9955, 46.1512]),
    ("Slovakia", [19.699, 48.669]),
    ("Sierra Leone", [-11.7799, 8.4606]),
    ("Senegal", [-14.4524, 14.4974]),
    ("Somalia", [46.1996, 5.1521]),
    ("Suriname", [-56.0278, 3.9193]),
    ("El Salvador", [-88.8965, 13.7942]),
    ("Syria", [38.9968, 34.8021]),
    ("Eswatini", [31.4659, -26.5225]),
    ("Chad", [18.7322, 15.4542]),
    ("Togo", [0.8248, 8.6195]),
    ("Thailand", [100.9925, 15.87]),
    ("Tajikistan", [71.2761, 38.861]),
    ("Turkmenistan", [59.5563, 38.9697]),
    ("Tunisia", [9.5375, 33.8869]),
    ("Turkey", [35.2433, 38.9637]),
    ("Trinidad and Tobago", [-61.2225, 10.6918]),
    ("Taiwan", [120.9605, 23.6978]),
    ("Tanzania", [34.8888, -6.369]),
    ("Ukraine", [31.1656, 48.3794]),
    ("Uganda", [32.2903, 1.3733]),
    ("United States", [-95.7129, 37.0902]),
    ("United States of America", [-95.7129, 37.0902]),
    ("USA", [-95.7129, 37.0902]),
    ("Uruguay", [-55.7658, -32.5228]),
    ("Uzbekistan", [64.5853, 41.3775]),
    ("Venezuela", [-66.5897, 6.4238]),
    ("Vietnam", [108.2772, 14.0583]),
    ("Yemen", [48.5164, 15.5527]),
    ("South Africa", [22.9375, -30.5595]),
    ("Zambia", [27.8493, -13.1339]),
    ("Zimbabwe", [29.1549, -19.0154]),
];

fn table() -> &'static HashMap<&'static str, [f64; 2]> {
    static TABLE: OnceLock<HashMap<&'static str, [f64; 2]>> = OnceLock::new();
    TABLE.get_or_init(|| COUNTRY_COORDINATES.iter().copied().collect())
}

/// Exact, case-sensitive lookup.
pub fn coordinates(country: &str) -> Option<[f64; 2]> {
    table().get(country).copied()
}
